// src/search/controller.rs

use crate::domain::listing::{Operation, PropertyKind};
use crate::search::filters::{active_count, FilterField, FilterState};
use crate::search::url_codec::{self, set_field};

/// Result of the first decode on mount.
#[derive(Debug, Clone, PartialEq)]
pub struct Initialized {
    pub state: FilterState,
    /// Bedrooms, bathrooms or location came in on the URL.
    pub show_advanced: bool,
}

/// Outcome of reconciling a navigation event with the held state.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlChange {
    Changed(FilterState),
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reset {
    pub state: FilterState,
    pub show_advanced: bool,
}

/// Owns the live form state. Every transition is a plain method call, and
/// `on_url_change` compares before it replaces, so a URL written by
/// `submit` and read back never triggers a second apply.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    state: FilterState,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn initialize_from_url(&mut self, query: &str) -> Initialized {
        self.state = url_codec::decode(query);
        Initialized {
            state: self.state.clone(),
            show_advanced: self.state.has_advanced(),
        }
    }

    /// Applies one edit. Invalid text becomes the inactive value, never an error.
    pub fn on_field_change(&mut self, field: FilterField, raw: &str) -> &FilterState {
        set_field(&mut self.state, field, raw);
        &self.state
    }

    /// Applies a submitted form, by field name, on top of the inactive state.
    /// Unknown names are ignored.
    pub fn apply_form<'a, I>(&mut self, pairs: I) -> &FilterState
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut next = FilterState::default();
        for (name, raw) in pairs {
            if let Some(field) = FilterField::from_name(name) {
                set_field(&mut next, field, raw);
            }
        }
        self.state = next;
        &self.state
    }

    pub fn on_url_change(&mut self, query: &str) -> UrlChange {
        let decoded = url_codec::decode(query);
        if decoded == self.state {
            return UrlChange::Unchanged;
        }
        self.state = decoded.clone();
        UrlChange::Changed(decoded)
    }

    pub fn replace(&mut self, state: FilterState) {
        self.state = state;
    }

    pub fn reset(&mut self) -> Reset {
        self.state = FilterState::default();
        Reset {
            state: self.state.clone(),
            show_advanced: false,
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) -> &FilterState {
        self.state = preset.apply(std::mem::take(&mut self.state));
        &self.state
    }

    pub fn active_count(&self) -> usize {
        active_count(&self.state)
    }
}

/// One-click shortcuts. Each overwrites only its own fields; everything else
/// the visitor already set is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    CasaFamiliar,
    DepartamentoRenta,
    Terrenos,
    OficinasRenta,
    Amueblados,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::CasaFamiliar,
        Preset::DepartamentoRenta,
        Preset::Terrenos,
        Preset::OficinasRenta,
        Preset::Amueblados,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Preset::CasaFamiliar => "casa_familiar",
            Preset::DepartamentoRenta => "departamento_renta",
            Preset::Terrenos => "terrenos",
            Preset::OficinasRenta => "oficinas_renta",
            Preset::Amueblados => "amueblados",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::CasaFamiliar => "Casa familiar",
            Preset::DepartamentoRenta => "Departamentos en renta",
            Preset::Terrenos => "Terrenos",
            Preset::OficinasRenta => "Oficinas en renta",
            Preset::Amueblados => "Amueblados en renta",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == raw.trim())
    }

    pub fn apply(self, mut state: FilterState) -> FilterState {
        match self {
            Preset::CasaFamiliar => {
                state.operation = Some(Operation::Venta);
                state.kind = Some(PropertyKind::Casa);
                state.bedrooms_min = Some(3);
                state.bathrooms_min = Some(2);
            }
            Preset::DepartamentoRenta => {
                state.operation = Some(Operation::Renta);
                state.kind = Some(PropertyKind::Departamento);
            }
            Preset::Terrenos => {
                state.operation = Some(Operation::Venta);
                state.kind = Some(PropertyKind::Terreno);
            }
            Preset::OficinasRenta => {
                state.operation = Some(Operation::Renta);
                state.kind = Some(PropertyKind::Oficina);
            }
            Preset::Amueblados => {
                state.operation = Some(Operation::Renta);
                state.furnished = Some(true);
            }
        }
        state
    }
}

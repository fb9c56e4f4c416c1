// src/search/sort.rs

use crate::domain::listing::Listing;
use crate::search::filters::SortKey;
use std::cmp::Ordering;

/// Returns a new, stably ordered copy. The input is left as it was.
pub fn apply_sort(listings: &[Listing], key: SortKey) -> Vec<Listing> {
    let mut out = listings.to_vec();
    out.sort_by(|a, b| compare(a, b, key));
    out
}

/// Stable sort of positions into `listings`; ties keep their order in `indices`.
pub fn sort_indices(listings: &[Listing], indices: &mut [usize], key: SortKey) {
    indices.sort_by(|&a, &b| compare(&listings[a], &listings[b], key));
}

pub fn compare(a: &Listing, b: &Listing, key: SortKey) -> Ordering {
    match key {
        SortKey::Recientes => b.created_at.cmp(&a.created_at),
        SortKey::PrecioAsc => cmp_f64(a.price, b.price),
        SortKey::PrecioDesc => cmp_f64(b.price, a.price),
        SortKey::AreaAsc => cmp_f64(a.built_area, b.built_area),
        SortKey::AreaDesc => cmp_f64(b.built_area, a.built_area),
        SortKey::TituloAsc => collate_es(&a.title, &b.title),
        SortKey::TituloDesc => collate_es(&b.title, &a.title),
    }
}

// Total order: a NaN price sorts after every real one instead of breaking the sort.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Spanish collation: accents and case are ignored at the first level, `ñ`
/// sorts between `n` and `o`. Remaining ties fall back to the accented,
/// case-folded text and finally the raw text, so equal titles stay equal.
pub fn collate_es(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> Vec<u32> {
    let mut key = Vec::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match ch {
            // n < ñ < o
            'ñ' => key.push(('n' as u32) * 2 + 1),
            _ => key.push((fold_accent(ch) as u32) * 2),
        }
    }
    key
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

//! Nearest-colour lookup by Euclidean RGB distance
//!
//! A full linear scan per query; catalogs are small enough that no spatial
//! index is built.

use crate::catalog::tile::{Catalog, Tile};
use crate::color::average::AverageColor;
use std::cmp::Ordering;

/// Euclidean distance between two colours in RGB space
pub fn euclidean_distance(a: AverageColor, b: AverageColor) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    dr.mul_add(dr, dg.mul_add(dg, db * db)).sqrt()
}

/// Closest candidate to `query`, with its distance
///
/// Equidistant candidates resolve to the lexically smallest id, whatever
/// order they are supplied in.
pub fn nearest<'a, I>(query: AverageColor, candidates: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = (&'a str, AverageColor)>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for (id, color) in candidates {
        let distance = euclidean_distance(query, color);
        let replace = match best {
            None => true,
            Some((best_id, best_distance)) => match distance.total_cmp(&best_distance) {
                Ordering::Less => true,
                Ordering::Equal => id < best_id,
                Ordering::Greater => false,
            },
        };
        if replace {
            best = Some((id, distance));
        }
    }
    best
}

/// Catalog tile whose average colour is closest to `query`
///
/// Returns `None` only for an empty catalog.
pub fn nearest_tile(query: AverageColor, catalog: &Catalog) -> Option<&Tile> {
    let (id, _) = nearest(
        query,
        catalog.tiles().map(|tile| (tile.id(), tile.average_color())),
    )?;
    catalog.get(id)
}

/// Id of the catalog tile closest to `query`
pub fn match_tile_id(query: AverageColor, catalog: &Catalog) -> Option<&str> {
    nearest_tile(query, catalog).map(Tile::id)
}

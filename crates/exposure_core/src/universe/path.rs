//! Market path: one simulated trajectory of market vertices.

use super::edge::MarketEdge;
use super::error::UniverseError;
use super::vertex::MarketVertex;
use crate::types::Date;

/// Ordered sequence of market vertices with strictly increasing dates.
///
/// The first vertex is the epochal vertex; every present value on the path
/// is expressed relative to its overnight replicator.
///
/// # Examples
///
/// ```
/// use exposure_core::types::Date;
/// use exposure_core::universe::{MarketPath, MarketVertex, MarketVertexEntity};
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let make = |d: Date| {
///     MarketVertex::new(d, 1.0, 1.0, 0.0, MarketVertexEntity::riskless(), MarketVertexEntity::riskless())
///         .unwrap()
/// };
/// let path = MarketPath::new(vec![make(t0), make(t0.add_days(30).unwrap())]).unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.edges().count(), 1);
/// assert!(MarketPath::new(vec![make(t0), make(t0)]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MarketPath {
    vertices: Vec<MarketVertex>,
}

impl MarketPath {
    /// Creates a path, validating that dates strictly increase.
    ///
    /// # Errors
    ///
    /// - `UniverseError::EmptyPath` if `vertices` is empty
    /// - `UniverseError::NonIncreasingDates` at the first date that does not advance
    pub fn new(vertices: Vec<MarketVertex>) -> Result<Self, UniverseError> {
        if vertices.is_empty() {
            return Err(UniverseError::EmptyPath);
        }
        for (index, pair) in vertices.windows(2).enumerate() {
            let (previous, current) = (pair[0].anchor_date(), pair[1].anchor_date());
            if current <= previous {
                return Err(UniverseError::NonIncreasingDates {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }
        Ok(Self { vertices })
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a path holds at least one vertex.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in date order.
    #[inline]
    pub fn vertices(&self) -> &[MarketVertex] {
        &self.vertices
    }

    /// Vertex at `index`, if any.
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<&MarketVertex> {
        self.vertices.get(index)
    }

    /// The epochal (first) vertex.
    #[inline]
    pub fn epochal(&self) -> &MarketVertex {
        &self.vertices[0]
    }

    /// Vertex anchored exactly on `date`.
    pub fn vertex_at(&self, date: Date) -> Result<&MarketVertex, UniverseError> {
        self.vertices
            .binary_search_by_key(&date, MarketVertex::anchor_date)
            .map(|i| &self.vertices[i])
            .map_err(|_| UniverseError::UnknownDate(date))
    }

    /// Anchor dates of all vertices.
    pub fn anchor_dates(&self) -> Vec<Date> {
        self.vertices.iter().map(MarketVertex::anchor_date).collect()
    }

    /// Edges between consecutive vertices, `len() - 1` of them.
    pub fn edges(&self) -> impl Iterator<Item = MarketEdge> + '_ {
        self.vertices
            .windows(2)
            .map(|pair| MarketEdge::spanning(pair[0], pair[1]))
    }

    /// Edge ending at vertex `index`.
    ///
    /// Vertex 0 has no predecessor and yields a degenerate edge.
    pub fn edge_into(&self, index: usize) -> Option<MarketEdge> {
        match index {
            0 => self.vertices.first().copied().map(MarketEdge::degenerate),
            i if i < self.vertices.len() => {
                Some(MarketEdge::spanning(self.vertices[i - 1], self.vertices[i]))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::MarketVertexEntity;

    fn make(days: i64, replicator: f64) -> MarketVertex {
        let date = Date::from_ymd(2024, 1, 1).unwrap().add_days(days).unwrap();
        MarketVertex::new(
            date,
            0.0,
            replicator,
            0.0,
            MarketVertexEntity::riskless(),
            MarketVertexEntity::riskless(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(MarketPath::new(vec![]), Err(UniverseError::EmptyPath));
    }

    #[test]
    fn test_non_increasing_reports_index() {
        let err = MarketPath::new(vec![make(0, 1.0), make(30, 1.0), make(20, 1.0)]).unwrap_err();
        assert!(matches!(err, UniverseError::NonIncreasingDates { index: 2, .. }));
    }

    #[test]
    fn test_vertex_lookup_by_date() {
        let path = MarketPath::new(vec![make(0, 1.0), make(30, 1.01), make(60, 1.02)]).unwrap();
        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(path.vertex_at(date).unwrap().overnight_replicator(), 1.01);
        assert!(path.vertex_at(date.add_days(1).unwrap()).is_err());
    }

    #[test]
    fn test_edges_follow_vertices() {
        let path = MarketPath::new(vec![make(0, 1.0), make(30, 1.0), make(90, 1.0)]).unwrap();
        let days: Vec<i64> = path.edges().map(|e| e.days()).collect();
        assert_eq!(days, vec![30, 60]);
        assert!(path.edge_into(0).unwrap().is_degenerate());
        assert_eq!(path.edge_into(2).unwrap().days(), 60);
        assert!(path.edge_into(3).is_none());
    }
}

//! Spacing parameters and their validation.

use super::types::Point;

/// Default depth guard. Deep enough for any interactive tree, small enough to
/// reject runaway input.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("subtree_separation ({subtree}) must be at least min_separation ({sibling})")]
    SubtreeSeparationTooSmall { sibling: f64, subtree: f64 },
    #[error("bounds on {axis} are empty: min {min} >= max {max}")]
    EmptyBounds { axis: char, min: f64, max: f64 },
}

/// Coordinate range every positioned node must fall inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Layout configuration.
///
/// Horizontally adjacent nodes are kept `separation + node_width` apart,
/// center to center: `min_separation` between siblings, `subtree_separation`
/// between nodes of different parents.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub min_separation: f64,
    pub subtree_separation: f64,
    /// Vertical distance between consecutive depths.
    pub level_height: f64,
    pub node_width: f64,
    pub max_depth: usize,
    /// Average with the mirrored layout so mirror-image trees get mirror-image output.
    pub symmetric: bool,
    /// Where the root ends up.
    pub origin: Point,
    pub bounds: Option<Bounds>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_separation: 1.0,
            subtree_separation: 1.0,
            level_height: 1.0,
            node_width: 0.0,
            max_depth: DEFAULT_MAX_DEPTH,
            symmetric: true,
            origin: Point::default(),
            bounds: None,
        }
    }
}

impl LayoutConfig {
    /// Same separation between siblings and between subtrees.
    pub fn with_separation(min_separation: f64, level_height: f64) -> Self {
        Self {
            min_separation,
            subtree_separation: min_separation,
            level_height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_separation", self.min_separation)?;
        positive("subtree_separation", self.subtree_separation)?;
        positive("level_height", self.level_height)?;

        finite("node_width", self.node_width)?;
        if self.node_width < 0.0 {
            return Err(ConfigError::Negative {
                field: "node_width",
                value: self.node_width,
            });
        }

        if self.subtree_separation < self.min_separation {
            return Err(ConfigError::SubtreeSeparationTooSmall {
                sibling: self.min_separation,
                subtree: self.subtree_separation,
            });
        }

        finite("origin.x", self.origin.x)?;
        finite("origin.y", self.origin.y)?;

        if let Some(b) = &self.bounds {
            if b.min_x.is_nan() || b.max_x.is_nan() || b.min_x >= b.max_x {
                return Err(ConfigError::EmptyBounds {
                    axis: 'x',
                    min: b.min_x,
                    max: b.max_x,
                });
            }
            if b.min_y.is_nan() || b.max_y.is_nan() || b.min_y >= b.max_y {
                return Err(ConfigError::EmptyBounds {
                    axis: 'y',
                    min: b.min_y,
                    max: b.max_y,
                });
            }
        }

        Ok(())
    }

    /// Center-to-center distance between two adjacent nodes on one level.
    pub(crate) fn distance(&self, siblings: bool) -> f64 {
        let separation = if siblings {
            self.min_separation
        } else {
            self.subtree_separation
        };
        separation + self.node_width
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_separation() {
        let config = LayoutConfig::with_separation(0.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "min_separation",
                value: 0.0
            })
        );

        let config = LayoutConfig::with_separation(-10.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "min_separation", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_level_height() {
        let config = LayoutConfig::with_separation(1.0, -30.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "level_height", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = LayoutConfig {
            level_height: f64::NAN,
            ..LayoutConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "level_height"
            })
        );
    }

    #[test]
    fn test_rejects_negative_node_width() {
        let config = LayoutConfig {
            node_width: -40.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "node_width", .. })
        ));
    }

    #[test]
    fn test_subtree_separation_at_least_sibling() {
        let config = LayoutConfig {
            min_separation: 10.0,
            subtree_separation: 5.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SubtreeSeparationTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_bounds() {
        let config = LayoutConfig {
            bounds: Some(Bounds {
                min_x: -100.0,
                max_x: 100.0,
                min_y: 100.0,
                max_y: -100.0,
            }),
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyBounds { axis: 'y', .. })
        ));
    }

    #[test]
    fn test_distance_includes_node_width() {
        let config = LayoutConfig {
            min_separation: 50.0,
            subtree_separation: 100.0,
            node_width: 250.0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.distance(true), 300.0);
        assert_eq!(config.distance(false), 350.0);
    }
}

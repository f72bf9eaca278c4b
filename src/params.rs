//! Tunable parameter schema and storage.
//!
//! Every generator input the operator can touch is declared here as a field
//! inside a named group, together with its numeric domain and default. The
//! [`ParamStore`] holds the current value of every field plus the two
//! environmental inputs (viewport resolution, elapsed time) and enforces the
//! domains on every write.

use crate::error::ParamError;

/// Slider step used by the finer-grained controls.
pub const MIN_STEP: f32 = 0.001;

/// The tunable parameter groups.
///
/// One group maps to exactly one generator input vector; the mapping is
/// fixed in [`crate::uniforms`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// Complex-plane window of the fractal, stored as (minX, maxX, minY, maxY).
    FractalBounds,
    /// Easing function selectors, each one of eight methods.
    Easings,
    /// Positional offset fed to the generator.
    LocalPosition,
    /// Interval fractions in [0, 1].
    Intervals,
}

impl Group {
    pub const ALL: [Group; 4] = [
        Group::FractalBounds,
        Group::Easings,
        Group::LocalPosition,
        Group::Intervals,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Group::FractalBounds => 0,
            Group::Easings => 1,
            Group::LocalPosition => 2,
            Group::Intervals => 3,
        }
    }
}

/// The declared numeric domain of a field.
#[derive(Clone, Copy, Debug)]
pub enum Domain {
    /// Continuous inclusive range, optionally quantized to a step from `min`.
    Range {
        min: f32,
        max: f32,
        step: Option<f32>,
    },
    /// Enumerated discrete set. Writes snap to the nearest member.
    Discrete(&'static [f32]),
}

impl Domain {
    /// Fit a finite candidate value into the domain and return what a
    /// conforming write would store.
    pub fn fit(&self, value: f32) -> f32 {
        match *self {
            Domain::Range { min, max, step } => {
                let clamped = value.clamp(min, max);
                match step {
                    Some(step) if step > 0.0 => {
                        let quantized = min + ((clamped - min) / step).round() * step;
                        quantized.clamp(min, max)
                    }
                    _ => clamped,
                }
            }
            Domain::Discrete(members) => {
                let mut best = members[0];
                for &member in members {
                    if (value - member).abs() < (value - best).abs() {
                        best = member;
                    }
                }
                best
            }
        }
    }
}

/// One tunable field: panel label, domain, startup value.
pub struct FieldSpec {
    pub label: &'static str,
    pub domain: Domain,
    pub default: f32,
}

/// One parameter group: panel heading plus its fields, in component order.
pub struct GroupSpec {
    pub group: Group,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

const EASING_METHODS: &[f32] = &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

/// The full parameter schema. Field order within a group is component order
/// in the projected generator input and must never change.
pub const SCHEMA: [GroupSpec; 4] = [
    GroupSpec {
        group: Group::FractalBounds,
        label: "Seed values",
        fields: &[
            FieldSpec {
                label: "minX",
                domain: Domain::Range { min: -2.0, max: 2.0, step: None },
                default: -0.611,
            },
            FieldSpec {
                label: "maxX",
                domain: Domain::Range { min: -2.0, max: 2.0, step: None },
                default: 0.74486,
            },
            FieldSpec {
                label: "minY",
                domain: Domain::Range { min: -2.0, max: 2.0, step: None },
                default: 0.0,
            },
            FieldSpec {
                label: "maxY",
                domain: Domain::Range { min: -2.0, max: 2.0, step: None },
                default: 0.3,
            },
        ],
    },
    GroupSpec {
        group: Group::Easings,
        label: "Easing methods",
        fields: &[
            FieldSpec {
                label: "Easing 1",
                domain: Domain::Discrete(EASING_METHODS),
                default: 3.0,
            },
            FieldSpec {
                label: "Easing 2",
                domain: Domain::Discrete(EASING_METHODS),
                default: 4.0,
            },
            FieldSpec {
                label: "Easing 3",
                domain: Domain::Discrete(EASING_METHODS),
                default: 5.0,
            },
        ],
    },
    GroupSpec {
        group: Group::LocalPosition,
        label: "Position",
        fields: &[
            FieldSpec {
                label: "X",
                domain: Domain::Range { min: -4.0, max: 4.0, step: Some(MIN_STEP) },
                default: 0.5,
            },
            FieldSpec {
                label: "Y",
                domain: Domain::Range { min: -4.0, max: 4.0, step: Some(MIN_STEP) },
                default: 2.1,
            },
            FieldSpec {
                label: "Z",
                domain: Domain::Range { min: -4.0, max: 0.0, step: Some(MIN_STEP) },
                default: 0.3,
            },
        ],
    },
    GroupSpec {
        group: Group::Intervals,
        label: "Intervals",
        fields: &[
            FieldSpec {
                label: "Interval1",
                domain: Domain::Range { min: 0.0, max: 1.0, step: Some(MIN_STEP) },
                default: 0.225,
            },
            FieldSpec {
                label: "Interval2",
                domain: Domain::Range { min: 0.0, max: 1.0, step: Some(MIN_STEP) },
                default: 0.732,
            },
            FieldSpec {
                label: "Interval3",
                domain: Domain::Range { min: 0.0, max: 1.0, step: Some(MIN_STEP) },
                default: 0.997,
            },
        ],
    },
];

/// Schema entry for a group.
pub fn group_spec(group: Group) -> &'static GroupSpec {
    &SCHEMA[group.index()]
}

/// Current value of every tunable field plus the environmental inputs.
///
/// Tunables are mutated only through [`ParamStore::set`]; resolution and
/// time are written directly by the viewport monitor and frame clock, never
/// by the control panel.
pub struct ParamStore {
    values: [[f32; 4]; 4],
    resolution: [f32; 2],
    time: f32,
    dirty: u8,
}

impl ParamStore {
    /// Construct the store with the schema's declared defaults.
    ///
    /// Defaults are stored verbatim; domain enforcement applies to writes.
    pub fn new() -> Self {
        let mut values = [[0.0; 4]; 4];
        for spec in &SCHEMA {
            for (i, field) in spec.fields.iter().enumerate() {
                values[spec.group.index()][i] = field.default;
            }
        }
        Self {
            values,
            resolution: [0.0, 0.0],
            time: 0.0,
            dirty: 0,
        }
    }

    /// Current value of one field.
    pub fn get(&self, group: Group, field: usize) -> f32 {
        self.values[group.index()][field]
    }

    /// Write one field, fitting the value into the field's domain first.
    ///
    /// Returns the value actually stored. Non-finite input is rejected with
    /// [`ParamError::InvalidValue`] and the store is left unchanged. A
    /// successful write marks the owning group dirty for re-projection.
    pub fn set(&mut self, group: Group, field: usize, value: f32) -> Result<f32, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::InvalidValue { group, field, value });
        }
        let spec = group_spec(group);
        let Some(field_spec) = spec.fields.get(field) else {
            return Err(ParamError::UnknownField { group, field });
        };
        let stored = field_spec.domain.fit(value);
        self.values[group.index()][field] = stored;
        self.dirty |= 1 << group.index();
        Ok(stored)
    }

    /// All four value slots of a group, in field order. Unused trailing
    /// slots are zero. Projection reads groups only through this, so sibling
    /// components always come from the same store state.
    pub fn group_values(&self, group: Group) -> [f32; 4] {
        self.values[group.index()]
    }

    /// Viewport resolution in pixels. Written by the viewport monitor.
    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub fn resolution(&self) -> [f32; 2] {
        self.resolution
    }

    /// Elapsed seconds since the frame clock started. Written once per tick.
    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Drain the dirty-group set accumulated by [`ParamStore::set`].
    pub fn take_dirty(&mut self) -> impl Iterator<Item = Group> {
        let mask = std::mem::take(&mut self.dirty);
        Group::ALL
            .into_iter()
            .filter(move |g| mask & (1 << g.index()) != 0)
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_schema() {
        let store = ParamStore::new();
        assert_eq!(store.get(Group::FractalBounds, 0), -0.611);
        assert_eq!(store.get(Group::FractalBounds, 1), 0.74486);
        assert_eq!(store.get(Group::Easings, 2), 5.0);
        assert_eq!(store.get(Group::Intervals, 1), 0.732);
        assert_eq!(store.time(), 0.0);
    }

    #[test]
    fn range_writes_clamp() {
        let mut store = ParamStore::new();
        assert_eq!(store.set(Group::FractalBounds, 0, 100.0), Ok(2.0));
        assert_eq!(store.get(Group::FractalBounds, 0), 2.0);
        assert_eq!(store.set(Group::FractalBounds, 0, -1e30), Ok(-2.0));
        assert_eq!(store.set(Group::FractalBounds, 0, 0.25), Ok(0.25));
    }

    #[test]
    fn stepped_writes_quantize() {
        let mut store = ParamStore::new();
        let stored = store.set(Group::Intervals, 0, 0.12345).unwrap();
        assert!((stored - 0.123).abs() < 1e-6);
        // Quantization never escapes the range.
        assert_eq!(store.set(Group::LocalPosition, 2, 3.0), Ok(0.0));
    }

    #[test]
    fn discrete_writes_snap_to_nearest_member() {
        let mut store = ParamStore::new();
        assert_eq!(store.set(Group::Easings, 0, 9.0), Ok(7.0));
        assert_eq!(store.set(Group::Easings, 0, -3.0), Ok(0.0));
        assert_eq!(store.set(Group::Easings, 1, 4.4), Ok(4.0));
    }

    #[test]
    fn non_finite_writes_are_rejected() {
        let mut store = ParamStore::new();
        let before = store.get(Group::FractalBounds, 1);
        let err = store.set(Group::FractalBounds, 1, f32::NAN).unwrap_err();
        assert!(matches!(err, ParamError::InvalidValue { .. }));
        assert_eq!(store.get(Group::FractalBounds, 1), before);
        assert!(store.set(Group::Intervals, 0, f32::INFINITY).is_err());
        // A rejected write must not dirty the group.
        assert_eq!(store.take_dirty().count(), 0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut store = ParamStore::new();
        let err = store.set(Group::Easings, 3, 1.0).unwrap_err();
        assert!(matches!(err, ParamError::UnknownField { .. }));
    }

    #[test]
    fn set_marks_owning_group_dirty() {
        let mut store = ParamStore::new();
        store.set(Group::Intervals, 1, 0.5).unwrap();
        store.set(Group::Easings, 0, 2.0).unwrap();
        let dirty: Vec<Group> = store.take_dirty().collect();
        assert_eq!(dirty, vec![Group::Easings, Group::Intervals]);
        // Drained.
        assert_eq!(store.take_dirty().count(), 0);
    }
}

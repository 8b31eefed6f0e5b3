//! Update/render decision table.
//!
//! | sighting            | on_ground | update | render |
//! |---------------------|-----------|--------|--------|
//! | outside, far        | true      | no     | no     |
//! | outside, far        | false     | yes    | no     |
//! | outside, near       | any       | yes    | no     |
//! | clear               | any       | yes    | yes    |
//! | occluded            | true      | no     | no     |
//! | occluded            | false     | yes    | no     |

/// What the camera can see of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    /// Outside the view volume. Line of sight is not tested.
    Outside { near: bool },
    /// Inside the view volume with an opaque voxel in the way.
    Occluded,
    /// Inside the view volume with nothing opaque in the way.
    Clear,
}

impl Sighting {
    #[inline]
    pub const fn is_occluded(self) -> bool {
        matches!(self, Self::Occluded)
    }
}

/// The two independent halves of a per-frame decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schedule {
    pub update: bool,
    pub render: bool,
}

impl Schedule {
    /// Drop the render half if the visibility filter says no.
    #[inline]
    #[must_use]
    pub const fn filtered(self, allowed: bool) -> Self {
        Self {
            update: self.update,
            render: self.render && allowed,
        }
    }
}

/// Decide whether an entity simulates and whether it is drawn.
///
/// Airborne entities always simulate so they can land.
#[inline]
pub const fn schedule(sighting: Sighting, on_ground: bool) -> Schedule {
    match sighting {
        Sighting::Clear => Schedule {
            update: true,
            render: true,
        },
        Sighting::Outside { near: true } => Schedule {
            update: true,
            render: false,
        },
        Sighting::Outside { near: false } | Sighting::Occluded => Schedule {
            update: !on_ground,
            render: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn s(update: bool, render: bool) -> Schedule {
        Schedule { update, render }
    }

    #[test]
    fn table() {
        let cases = [
            (Sighting::Outside { near: false }, true, s(false, false)),
            (Sighting::Outside { near: false }, false, s(true, false)),
            (Sighting::Outside { near: true }, true, s(true, false)),
            (Sighting::Outside { near: true }, false, s(true, false)),
            (Sighting::Clear, true, s(true, true)),
            (Sighting::Clear, false, s(true, true)),
            (Sighting::Occluded, true, s(false, false)),
            (Sighting::Occluded, false, s(true, false)),
        ];

        for (sighting, on_ground, expected) in cases {
            assert_eq!(
                schedule(sighting, on_ground),
                expected,
                "{sighting:?} on_ground={on_ground}"
            );
        }
    }

    #[test]
    fn render_implies_clear_sighting() {
        for sighting in [
            Sighting::Outside { near: false },
            Sighting::Outside { near: true },
            Sighting::Occluded,
            Sighting::Clear,
        ] {
            for on_ground in [false, true] {
                if schedule(sighting, on_ground).render {
                    assert_eq!(sighting, Sighting::Clear);
                }
            }
        }
    }

    #[test]
    fn filter_never_touches_update() {
        let visible = s(true, true);
        assert_eq!(visible.filtered(false), s(true, false));
        assert_eq!(visible.filtered(true), visible);
        assert_eq!(s(false, false).filtered(true), s(false, false));
    }
}

use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::flight_physics::FlightState;

/// An item shaken loose by a strike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DislodgedItem {
    pub id: String,
    pub count: u32,
}

/// Something occupying the space below a character that reacts to being
/// struck (fruit-bearing structures, mostly). The target decides whether to
/// cascade the strike further down; this core only forwards the call.
pub trait StrikeTarget: Send + Sync {
    fn on_struck(&mut self, position: Vec3) -> Vec<DislodgedItem>;
}

/// External "strike" action against a character: resets its flight pose and
/// age, then delegates to whatever occupies the position below. Nothing
/// below means nothing dislodged.
pub fn on_struck(
    state: &mut FlightState,
    below: Option<&mut dyn StrikeTarget>,
    position: Vec3,
) -> Vec<DislodgedItem> {
    state.ticks_in_air = 0;
    state.thrust_scale = 0.0;

    match below {
        Some(target) => target.on_struck(position),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FruitCluster {
        struck: u32,
    }

    impl StrikeTarget for FruitCluster {
        fn on_struck(&mut self, _position: Vec3) -> Vec<DislodgedItem> {
            self.struck += 1;
            vec![DislodgedItem {
                id: "windfall_fruit".into(),
                count: 3,
            }]
        }
    }

    #[test]
    fn strike_resets_flight_and_cascades() {
        let mut state = FlightState {
            ticks_in_air: 140,
            thrust_scale: 0.7,
            ..Default::default()
        };
        let mut cluster = FruitCluster { struck: 0 };

        let items = on_struck(&mut state, Some(&mut cluster), Vec3::new(4.0, 60.0, -2.0));

        assert_eq!(state.ticks_in_air, 0);
        assert_eq!(state.thrust_scale, 0.0);
        assert_eq!(cluster.struck, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].count, 3);
    }

    #[test]
    fn strike_over_nothing_dislodges_nothing() {
        let mut state = FlightState::default();
        let items = on_struck(&mut state, None, Vec3::ZERO);
        assert!(items.is_empty());
    }
}

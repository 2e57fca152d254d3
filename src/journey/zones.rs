use bevy::prelude::*;

use super::JourneyError;

/// A narrative waypoint that perturbs the camera when it comes close.
#[derive(Clone, Debug, Reflect)]
pub struct ProximityZone {
    /// World-space anchor of the text section.
    pub anchor: Vec3,
    /// Signed lateral drift preference: sign is the side, magnitude the distance.
    pub rail_bias: f32,
    /// Headline shown at the anchor.
    pub title: String,
    /// Body text shown under the title.
    pub subtitle: String,
}

/// Friction and camera-rail target produced by a proximity probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    /// Multiplier on the scroll smoothing rate, in `[min_friction, 1]`.
    pub friction: f32,
    /// Where the camera rail should drift toward.
    pub rail_target: Vec3,
    /// Index of the zone in range, if any.
    pub zone: Option<usize>,
}

impl Proximity {
    /// Far from every zone: full speed, rail centred.
    pub const OPEN: Self = Self {
        friction: 1.0,
        rail_target: Vec3::ZERO,
        zone: None,
    };
}

/// Fixed, read-only list of zones plus the distance at which they take effect.
#[derive(Clone, Debug, Reflect)]
pub struct ProximityZoneSet {
    zones: Vec<ProximityZone>,
    threshold: f32,
    min_friction: f32,
}

impl ProximityZoneSet {
    /// Friction floor applied when the camera sits right on an anchor.
    pub const MIN_FRICTION: f32 = 0.1;

    /// Builds the set. `threshold` must be positive and finite.
    pub fn new(zones: Vec<ProximityZone>, threshold: f32) -> Result<Self, JourneyError> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(JourneyError::InvalidThreshold(threshold));
        }
        Ok(Self {
            zones,
            threshold,
            min_friction: Self::MIN_FRICTION,
        })
    }

    /// All zones, in declaration order.
    pub fn zones(&self) -> &[ProximityZone] {
        &self.zones
    }

    /// Distance below which a zone applies friction.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Evaluates friction and rail target for a camera at `position`.
    ///
    /// When several zones are in range the nearest one wins, which is also
    /// the one producing the smallest friction.
    pub fn probe(&self, position: Vec3) -> Proximity {
        let nearest = self
            .zones
            .iter()
            .enumerate()
            .map(|(i, zone)| (i, zone, zone.anchor.distance(position)))
            .filter(|&(_, _, distance)| distance < self.threshold)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let Some((index, zone, distance)) = nearest else {
            return Proximity::OPEN;
        };

        let closeness = distance / self.threshold;
        Proximity {
            friction: closeness.max(self.min_friction),
            rail_target: Vec3::new(zone.rail_bias * (1.0 - closeness), 0.0, -1.0),
            zone: Some(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(anchor: Vec3, rail_bias: f32) -> ProximityZone {
        ProximityZone {
            anchor,
            rail_bias,
            title: String::new(),
            subtitle: String::new(),
        }
    }

    #[test]
    fn rejects_non_positive_threshold() {
        assert_eq!(
            ProximityZoneSet::new(vec![], 0.0).unwrap_err(),
            JourneyError::InvalidThreshold(0.0)
        );
        assert!(ProximityZoneSet::new(vec![], -1.0).is_err());
        assert!(ProximityZoneSet::new(vec![], f32::NAN).is_err());
        assert!(ProximityZoneSet::new(vec![], f32::INFINITY).is_err());
    }

    #[test]
    fn far_from_every_zone_is_frictionless() {
        let set = ProximityZoneSet::new(vec![zone(Vec3::new(0.0, 0.0, -250.0), 1.5)], 42.0).unwrap();
        let p = set.probe(Vec3::ZERO);
        assert_eq!(p, Proximity::OPEN);
        assert_eq!(p.friction, 1.0);
    }

    #[test]
    fn exactly_at_threshold_is_out_of_range() {
        let set = ProximityZoneSet::new(vec![zone(Vec3::ZERO, 1.0)], 42.0).unwrap();
        assert_eq!(set.probe(Vec3::new(42.0, 0.0, 0.0)).friction, 1.0);
    }

    #[test]
    fn ten_units_from_anchor() {
        let set = ProximityZoneSet::new(vec![zone(Vec3::new(0.0, 0.0, -250.0), 1.5)], 42.0).unwrap();
        let p = set.probe(Vec3::new(0.0, 0.0, -240.0));
        assert!((p.friction - 10.0 / 42.0).abs() < 1e-5);
        assert!((p.friction - 0.238).abs() < 1e-3);
        assert!((p.rail_target.x - 1.5 * (1.0 - 10.0 / 42.0)).abs() < 1e-5);
        assert!((p.rail_target.x - 1.14).abs() < 0.01);
        assert_eq!(p.rail_target.y, 0.0);
        assert_eq!(p.rail_target.z, -1.0);
        assert_eq!(p.zone, Some(0));
    }

    #[test]
    fn friction_floors_at_minimum() {
        let set = ProximityZoneSet::new(vec![zone(Vec3::ZERO, -1.0)], 42.0).unwrap();
        let p = set.probe(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(p.friction, ProximityZoneSet::MIN_FRICTION);
        assert!(p.rail_target.x < 0.0, "negative bias drifts left");
    }

    #[test]
    fn nearest_zone_dominates() {
        let set = ProximityZoneSet::new(
            vec![
                zone(Vec3::new(0.0, 0.0, -30.0), 1.5),
                zone(Vec3::new(0.0, 0.0, -5.0), -1.0),
                zone(Vec3::new(0.0, 0.0, -20.0), 1.5),
            ],
            42.0,
        )
        .unwrap();
        let p = set.probe(Vec3::ZERO);
        assert_eq!(p.zone, Some(1));
        assert!((p.friction - 5.0 / 42.0).abs() < 1e-5);
        assert!(p.rail_target.x < 0.0);
    }

    #[test]
    fn friction_stays_within_bounds() {
        let set = ProximityZoneSet::new(vec![zone(Vec3::ZERO, 1.0)], 42.0).unwrap();
        for i in 0..200 {
            let p = set.probe(Vec3::new(i as f32 * 0.5, 0.0, 0.0));
            assert!((0.1..=1.0).contains(&p.friction));
        }
    }
}

//! Whole-goal conversion at the backend boundary.

use horizon_core::{LocalDateTime, LocalGoal, WireGoal};

use crate::context::TimeContext;

impl TimeContext {
    /// Decode every temporal field of a wire goal into a local value.
    ///
    /// Non-temporal fields move over unchanged; absent fields stay absent.
    pub fn decode_goal(&self, wire: WireGoal) -> LocalGoal {
        let zone = self.zone();
        wire.map_times(|instant| LocalDateTime::new(instant, zone))
    }

    /// Decode a batch of wire goals.
    pub fn decode_goals(&self, wire: Vec<WireGoal>) -> Vec<LocalGoal> {
        tracing::debug!("Decoding {} goals in {}", wire.len(), self.zone());
        wire.into_iter().map(|goal| self.decode_goal(goal)).collect()
    }
}

/// Encode every temporal field of a local goal back to a wire instant.
pub fn encode_goal(local: LocalGoal) -> WireGoal {
    local.map_times(|value| value.instant())
}

/// Encode a batch of local goals.
pub fn encode_goals(local: Vec<LocalGoal>) -> Vec<WireGoal> {
    local.into_iter().map(encode_goal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::{FixedClock, GoalType, Instant, ResolutionStatus, Zone, TEMPORAL_FIELDS};

    fn context() -> TimeContext {
        TimeContext::new(Zone::Named(chrono_tz::Europe::London), FixedClock::at_millis(0))
    }

    fn full_goal() -> WireGoal {
        WireGoal {
            id: Some(11),
            name: "Morning run".to_string(),
            goal_type: GoalType::Routine,
            priority: Some("high".to_string()),
            resolution_status: Some(ResolutionStatus::Completed),
            duration: Some(30),
            start_timestamp: Some(Instant::from_millis(1_700_000_000_000)),
            end_timestamp: Some(Instant::from_millis(1_700_000_000_001)),
            next_timestamp: Some(Instant::from_millis(1_711_846_800_000)),
            scheduled_timestamp: Some(Instant::from_millis(-1)),
            routine_time: Some(Instant::from_millis(25_200_000)),
            due_date: Some(Instant::from_millis(1_729_990_800_000)),
            start_date: Some(Instant::from_millis(0)),
            resolved_at: Some(Instant::from_millis(1_700_000_123_456)),
            updated_at: Some(Instant::from_millis(1_700_000_999_999)),
            gcal_last_sync: Some(Instant::from_millis(1_650_000_000_000)),
            parent_id: Some(4),
            parent_type: Some("routine".to_string()),
            gcal_event_id: Some("abc123".to_string()),
            gcal_sync_enabled: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_goal_round_trip_all_fields() {
        let ctx = context();
        let wire = full_goal();
        assert_eq!(encode_goal(ctx.decode_goal(wire.clone())), wire);
    }

    #[test]
    fn test_goal_round_trip_subsets() {
        let ctx = context();
        let full = full_goal();

        // Every subset of temporal fields survives with absent fields absent.
        for mask in 0u32..(1 << TEMPORAL_FIELDS.len()) {
            let keep = |bit: u32, value: Option<Instant>| value.filter(|_| mask & (1 << bit) != 0);
            let wire = WireGoal {
                start_timestamp: keep(0, full.start_timestamp),
                end_timestamp: keep(1, full.end_timestamp),
                next_timestamp: keep(2, full.next_timestamp),
                scheduled_timestamp: keep(3, full.scheduled_timestamp),
                routine_time: keep(4, full.routine_time),
                due_date: keep(5, full.due_date),
                start_date: keep(6, full.start_date),
                resolved_at: keep(7, full.resolved_at),
                updated_at: keep(8, full.updated_at),
                gcal_last_sync: keep(9, full.gcal_last_sync),
                ..full.clone()
            };

            let back = encode_goal(ctx.decode_goal(wire.clone()));
            assert_eq!(back, wire, "mask {:#012b}", mask);
        }
    }

    #[test]
    fn test_decoded_fields_read_in_context_zone() {
        let ctx = context();
        let local = ctx.decode_goal(full_goal());

        let due = local.due_date.unwrap();
        assert_eq!(due.zone(), ctx.zone());
        assert_eq!(due.instant(), Instant::from_millis(1_729_990_800_000));
        assert_eq!(local.name, "Morning run");
        assert!(local.frequency.is_none());
    }

    #[test]
    fn test_wire_json_round_trip_through_local() {
        let json = r#"{"id":1,"name":"Ship","goal_type":"task","start_timestamp":1673778600000,"due_date":1673782200000}"#;
        let wire: WireGoal = serde_json::from_str(json).unwrap();
        let back = encode_goal(context().decode_goal(wire));
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }

    #[test]
    fn test_batch_conversion_preserves_order() {
        let ctx = context();
        let goals = vec![
            WireGoal {
                id: Some(1),
                ..Default::default()
            },
            WireGoal {
                id: Some(2),
                due_date: Some(Instant::from_millis(5)),
                ..Default::default()
            },
        ];
        let back = encode_goals(ctx.decode_goals(goals.clone()));
        assert_eq!(back, goals);
    }
}

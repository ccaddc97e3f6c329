//! JSON Schema generation for the wire types `roster-core` reads and writes.
//!
//! Kept as a separate crate so neither the solver nor its transports need to
//! link `schemars` to do their actual work; this is the one place that turns
//! `ScheduleRequest`/`ScheduleResponse`/`Settings`/the senior variant's
//! request type into schema documents a client can validate against before
//! ever calling the solver.

use roster_core::model::{ScheduleRequest, ScheduleResponse};
use roster_core::senior::SeniorScheduleRequest;
use roster_core::Settings;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// JSON Schema for the full-variant request body.
pub fn schedule_request_schema() -> RootSchema {
    schema_for!(ScheduleRequest)
}

/// JSON Schema for the full-variant response body.
pub fn schedule_response_schema() -> RootSchema {
    schema_for!(ScheduleResponse)
}

/// JSON Schema for the senior-variant request body.
pub fn senior_schedule_request_schema() -> RootSchema {
    schema_for!(SeniorScheduleRequest)
}

/// JSON Schema for the penalty-weight settings blob.
pub fn settings_schema() -> RootSchema {
    schema_for!(Settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonschema::JSONSchema;

    fn compiled(root: &RootSchema) -> JSONSchema {
        let value = serde_json::to_value(root).unwrap();
        JSONSchema::compile(&value).expect("generated schema must itself be valid")
    }

    #[test]
    fn schedule_request_schema_accepts_a_minimal_request() {
        let schema = compiled(&schedule_request_schema());
        let instance = serde_json::json!({
            "period": {
                "id": "p1",
                "name": "December",
                "startDate": "2025-12-01",
                "endDate": "2025-12-31"
            },
            "users": [{ "id": "u1", "name": "Alice" }],
            "slots": [{
                "id": "s1",
                "date": "2025-12-01",
                "dutyType": "A",
                "dayType": "WEEKDAY",
                "seats": [{ "id": "se1" }]
            }],
            "unavailability": []
        });
        assert!(schema.is_valid(&instance));
    }

    #[test]
    fn schedule_request_schema_rejects_an_unknown_duty_type() {
        let schema = compiled(&schedule_request_schema());
        let instance = serde_json::json!({
            "period": {
                "id": "p1",
                "name": "December",
                "startDate": "2025-12-01",
                "endDate": "2025-12-31"
            },
            "users": [],
            "slots": [{
                "id": "s1",
                "date": "2025-12-01",
                "dutyType": "Z",
                "dayType": "WEEKDAY",
                "seats": [{ "id": "se1" }]
            }]
        });
        assert!(!schema.is_valid(&instance));
    }

    #[test]
    fn schedule_response_schema_round_trips_a_real_response() {
        let response = ScheduleResponse {
            assignments: vec![],
            meta: roster_core::model::ScheduleMeta {
                base: 1,
                max_shifts: 1,
                min_shifts: 1,
                total_slots: 1,
                total_assignments: 0,
                users_at_base_plus2: 0,
                unavailability_violations: 0,
                warnings: vec![],
                solver_status: roster_core::duty::SolverStatus::Optimal,
                solve_time_ms: 1.5,
            },
        };
        let schema = compiled(&schedule_response_schema());
        let instance = serde_json::to_value(&response).unwrap();
        assert!(schema.is_valid(&instance));
    }

    #[test]
    fn settings_schema_accepts_the_default_settings() {
        let schema = compiled(&settings_schema());
        let instance = serde_json::to_value(roster_core::Settings::default()).unwrap();
        assert!(schema.is_valid(&instance));
    }

    #[test]
    fn senior_schedule_request_schema_accepts_a_minimal_request() {
        let schema = compiled(&senior_schedule_request_schema());
        let instance = serde_json::json!({
            "period": {
                "id": "p1",
                "name": "December",
                "startDate": "2025-12-01",
                "endDate": "2025-12-31"
            },
            "users": [{ "id": "u1", "name": "Alice" }],
            "slots": [{
                "id": "s1",
                "date": "2025-12-01",
                "segment": "MORNING",
                "seats": [{ "id": "se1" }]
            }],
            "unavailability": []
        });
        assert!(schema.is_valid(&instance));
    }

    #[test]
    fn schema_documents_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule_request.schema.json");
        std::fs::write(&path, serde_json::to_vec_pretty(&schedule_request_schema()).unwrap()).unwrap();
        let read_back: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(read_back["title"], serde_json::json!("ScheduleRequest"));
    }
}

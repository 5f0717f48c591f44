//! Client for the generative advisory endpoints. Responses are treated as
//! untrusted payloads and run through the domain decoders; transport and
//! shape problems surface as read errors which the service layer turns into
//! fixed fallbacks.

use gloo_net::http::Request;
use serde_json::{Value, json};

use liftlog_domain as domain;

use crate::rest::fetch;

pub struct RestAdvisor;

impl domain::AdvisoryRepository for RestAdvisor {
    async fn classify_exercise(
        &self,
        input: &str,
    ) -> Result<domain::ExerciseClassification, domain::ReadError> {
        let value: Value = fetch(
            Request::post("api/advisor/classification")
                .json(&json!({ "input": input }))
                .expect("serialization failed"),
        )
        .await?;
        Ok(domain::ExerciseClassification::decode(&value, input))
    }

    async fn suggest_alternatives(
        &self,
        exercise_name: &str,
        muscle_group: domain::MuscleGroup,
    ) -> Result<Vec<domain::Alternative>, domain::ReadError> {
        let value: Value = fetch(
            Request::post("api/advisor/alternatives")
                .json(&json!({
                    "exercise": exercise_name,
                    "muscleGroup": muscle_group.name(),
                }))
                .expect("serialization failed"),
        )
        .await?;
        Ok(domain::Alternative::decode_list(&value))
    }

    async fn form_tips(&self, exercise_name: &str) -> Result<Vec<String>, domain::ReadError> {
        let value: Value = fetch(
            Request::post("api/advisor/tips")
                .json(&json!({ "exercise": exercise_name }))
                .expect("serialization failed"),
        )
        .await?;
        Ok(domain::decode_form_tips(&value))
    }

    async fn generate_routine(
        &self,
        prompt: &str,
    ) -> Result<domain::RoutineDraft, domain::ReadError> {
        let value: Value = fetch(
            Request::post("api/advisor/routine")
                .json(&json!({ "prompt": prompt }))
                .expect("serialization failed"),
        )
        .await?;
        Ok(domain::RoutineDraft::decode(&value))
    }

    async fn coach_insight(
        &self,
        volumes: &[domain::WeeklyVolume],
    ) -> Result<String, domain::ReadError> {
        let value: Value = fetch(
            Request::post("api/advisor/insight")
                .json(&json!({
                    "volumes": volumes
                        .iter()
                        .map(|v| {
                            json!({
                                "muscleGroup": v.muscle_group.name(),
                                "count": v.count,
                                "goal": v.goal,
                            })
                        })
                        .collect::<Vec<_>>(),
                }))
                .expect("serialization failed"),
        )
        .await?;
        value
            .as_str()
            .map(str::trim)
            .filter(|insight| !insight.is_empty())
            .map(ToString::to_string)
            .ok_or(domain::ReadError::NotFound)
    }
}

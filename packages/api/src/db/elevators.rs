use reqwest::Method;
use serde::Serialize;
use store::{Elevator, ElevatorInput};

use super::{eq_filter, returning, single};
use crate::client::RemoteClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct NewElevator<'a> {
    #[serde(flatten)]
    input: &'a ElevatorInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<&'a str>,
}

impl RemoteClient {
    pub async fn insert_elevator(&self, company_id: Option<&str>, input: &ElevatorInput) -> Result<Elevator, ApiError> {
        let body = NewElevator { input, company_id };
        let req = returning(self.authorized(Method::POST, self.rest_url("elevators")).await).json(&body);
        let rows: Vec<Elevator> = self.send(req).await?;
        single(rows, "Elevator")
    }

    pub async fn update_elevator(&self, id: &str, input: &ElevatorInput) -> Result<Elevator, ApiError> {
        let url = eq_filter(self.rest_url("elevators"), "id", id);
        let req = returning(self.authorized(Method::PATCH, url).await).json(input);
        let rows: Vec<Elevator> = self.send(req).await?;
        single(rows, "Elevator")
    }

    pub async fn delete_elevator(&self, id: &str) -> Result<(), ApiError> {
        let url = eq_filter(self.rest_url("elevators"), "id", id);
        let req = returning(self.authorized(Method::DELETE, url).await);
        let rows: Vec<Elevator> = self.send(req).await?;
        single(rows, "Elevator").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use store::ElevatorStatus;

    #[test]
    fn test_new_elevator_body() {
        let input = ElevatorInput {
            serial_number: "A120".into(),
            model: "Gen2".into(),
            capacity: 630,
            status: ElevatorStatus::Maintenance,
            building_id: None,
            last_inspection: NaiveDate::from_ymd_opt(2024, 3, 1),
            next_inspection: None,
        };
        let body = serde_json::to_value(NewElevator {
            input: &input,
            company_id: Some("c1"),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "serial_number": "A120",
                "model": "Gen2",
                "capacity": 630,
                "status": "maintenance",
                "building_id": null,
                "last_inspection": "2024-03-01",
                "next_inspection": null,
                "company_id": "c1"
            })
        );
    }
}

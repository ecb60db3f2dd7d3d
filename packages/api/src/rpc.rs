//! # Named procedures and the `Backend` implementation
//!
//! Elevator reads and every parts operation go through procedures under
//! `/rest/v1/rpc/<name>`. Each answers with an [`RpcResult`] envelope; a
//! `success: false` envelope carries the server's message, which is what the
//! user sees.
//!
//! Parameters are `p_`-prefixed, matching the procedure signatures.

use chrono::NaiveDate;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{
    Backend, BackendError, BackendResult, Building, Elevator, ElevatorInput, ElevatorPart, PartInput,
    PartStatus, RpcResult,
};

use crate::client::RemoteClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct CompanyParams<'a> {
    p_company_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ElevatorIdParams<'a> {
    p_elevator_id: &'a str,
}

#[derive(Serialize)]
struct ElevatorIdsParams<'a> {
    p_elevator_ids: &'a [String],
}

#[derive(Serialize)]
struct PartIdParams<'a> {
    p_part_id: &'a str,
}

/// Fields of `add_elevator_part` / `update_elevator_part`. Exactly one of the
/// two ids is set.
#[derive(Serialize)]
struct PartParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    p_elevator_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    p_part_id: Option<&'a str>,
    p_name: &'a str,
    p_part_number: &'a str,
    p_manufacturer: Option<&'a str>,
    p_installation_date: Option<NaiveDate>,
    p_last_maintenance_date: Option<NaiveDate>,
    p_status: PartStatus,
    p_description: Option<&'a str>,
}

impl<'a> PartParams<'a> {
    fn new(input: &'a PartInput) -> Self {
        Self {
            p_elevator_id: None,
            p_part_id: None,
            p_name: &input.name,
            p_part_number: &input.part_number,
            p_manufacturer: input.manufacturer.as_deref(),
            p_installation_date: input.installation_date,
            p_last_maintenance_date: input.last_maintenance_date,
            p_status: input.status,
            p_description: input.description.as_deref(),
        }
    }
}

/// A list procedure may report success with no data when nothing matches.
fn into_list<T>(result: RpcResult<Vec<T>>) -> BackendResult<Vec<T>> {
    if result.success && result.data.is_none() {
        return Ok(Vec::new());
    }
    result.into_result()
}

fn logged<T>(op: &str, result: Result<T, ApiError>) -> BackendResult<T> {
    result.map_err(|e| {
        tracing::error!("{} failed: {}", op, e);
        BackendError::from(e)
    })
}

impl RemoteClient {
    pub async fn rpc<P, T>(&self, name: &str, params: &P) -> Result<RpcResult<T>, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.rest_url(&format!("rpc/{name}"));
        let req = self.authorized(Method::POST, url).await.json(params);
        self.send(req).await
    }
}

impl Backend for RemoteClient {
    async fn get_elevators(&self, company_id: Option<&str>) -> BackendResult<Vec<Elevator>> {
        let result = logged(
            "get_elevators",
            self.rpc("get_elevators", &CompanyParams { p_company_id: company_id }).await,
        )?;
        into_list(result)
    }

    async fn create_elevator(&self, company_id: Option<&str>, input: &ElevatorInput) -> BackendResult<Elevator> {
        let elevator = logged("insert elevator", self.insert_elevator(company_id, input).await)?;
        tracing::info!("Elevator {} created", elevator.id);
        Ok(elevator)
    }

    async fn update_elevator(&self, id: &str, input: &ElevatorInput) -> BackendResult<()> {
        logged("update elevator", RemoteClient::update_elevator(self, id, input).await)?;
        tracing::info!("Elevator {} updated", id);
        Ok(())
    }

    async fn delete_elevator(&self, id: &str) -> BackendResult<()> {
        logged("delete elevator", RemoteClient::delete_elevator(self, id).await)?;
        tracing::info!("Elevator {} deleted", id);
        Ok(())
    }

    async fn get_buildings_for_elevators(&self, elevator_ids: &[String]) -> BackendResult<Vec<Building>> {
        if elevator_ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = logged(
            "get_buildings_for_elevators",
            self.rpc(
                "get_buildings_for_elevators",
                &ElevatorIdsParams {
                    p_elevator_ids: elevator_ids,
                },
            )
            .await,
        )?;
        into_list(result)
    }

    async fn get_elevator_parts(&self, elevator_id: &str) -> BackendResult<Vec<ElevatorPart>> {
        let result = logged(
            "get_elevator_parts",
            self.rpc(
                "get_elevator_parts",
                &ElevatorIdParams {
                    p_elevator_id: elevator_id,
                },
            )
            .await,
        )?;
        into_list(result)
    }

    async fn add_elevator_part(&self, elevator_id: &str, input: &PartInput) -> BackendResult<()> {
        let params = PartParams {
            p_elevator_id: Some(elevator_id),
            ..PartParams::new(input)
        };
        let result: RpcResult<serde_json::Value> =
            logged("add_elevator_part", self.rpc("add_elevator_part", &params).await)?;
        result.into_unit()
    }

    async fn update_elevator_part(&self, part_id: &str, input: &PartInput) -> BackendResult<()> {
        let params = PartParams {
            p_part_id: Some(part_id),
            ..PartParams::new(input)
        };
        let result: RpcResult<serde_json::Value> =
            logged("update_elevator_part", self.rpc("update_elevator_part", &params).await)?;
        result.into_unit()
    }

    async fn delete_elevator_part(&self, part_id: &str) -> BackendResult<()> {
        let result: RpcResult<serde_json::Value> = logged(
            "delete_elevator_part",
            self.rpc("delete_elevator_part", &PartIdParams { p_part_id: part_id }).await,
        )?;
        result.into_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part_input() -> PartInput {
        PartInput {
            name: "Door operator".into(),
            part_number: "DO-77".into(),
            manufacturer: None,
            installation_date: NaiveDate::from_ymd_opt(2023, 6, 30),
            last_maintenance_date: None,
            status: PartStatus::NeedsMaintenance,
            description: Some("Replaced belt".into()),
        }
    }

    #[test]
    fn test_add_part_params() {
        let input = part_input();
        let params = PartParams {
            p_elevator_id: Some("e1"),
            ..PartParams::new(&input)
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "p_elevator_id": "e1",
                "p_name": "Door operator",
                "p_part_number": "DO-77",
                "p_manufacturer": null,
                "p_installation_date": "2023-06-30",
                "p_last_maintenance_date": null,
                "p_status": "needs_maintenance",
                "p_description": "Replaced belt"
            })
        );
    }

    #[test]
    fn test_update_part_params_carry_part_id_only() {
        let input = part_input();
        let params = PartParams {
            p_part_id: Some("p7"),
            ..PartParams::new(&input)
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["p_part_id"], "p7");
        assert!(value.get("p_elevator_id").is_none());
    }

    #[test]
    fn test_unscoped_fetch_sends_null_company() {
        let value = serde_json::to_value(CompanyParams { p_company_id: None }).unwrap();
        assert_eq!(value, json!({ "p_company_id": null }));
    }

    #[test]
    fn test_list_envelopes() {
        let empty: RpcResult<Vec<Building>> =
            serde_json::from_value(json!({ "success": true, "data": null })).unwrap();
        assert_eq!(into_list(empty).unwrap(), Vec::<Building>::new());

        let denied: RpcResult<Vec<Building>> =
            serde_json::from_value(json!({ "success": false, "message": "Access denied" })).unwrap();
        assert_eq!(into_list(denied), Err(BackendError::Remote("Access denied".into())));
    }

    #[test]
    fn test_failed_call_maps_to_remote_message() {
        let err = logged::<()>(
            "delete_elevator_part",
            Err(ApiError::Status {
                status: 400,
                message: "Part is referenced by a work order".into(),
            }),
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Part is referenced by a work order");
    }
}

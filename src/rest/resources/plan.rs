//! The Plan resource.
//!
//! Plan responses are keyed by plan id: `{"plans": {"4": {...}}}`, both for
//! a single plan and for the listing.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::{CloudResource, IdContext, PropertyEnvelope, Resource, ResourceError};

/// A plan that can be assigned to a site.
///
/// URL `plan/{plan_id}`; properties under `plans.{plan_id}`.
#[derive(Clone, Debug)]
pub struct Plan {
    plan_id: String,
    resource: Resource,
}

impl Plan {
    /// Resource type name.
    pub const NAME: &'static str = "Plan";

    fn envelope(plan_id: &str) -> PropertyEnvelope {
        PropertyEnvelope::Nested {
            outer: "plans",
            inner: plan_id.to_string(),
        }
    }

    /// Creates an unloaded plan.
    #[must_use]
    pub fn new(client: &RestClient, plan_id: impl Display) -> Self {
        let plan_id = plan_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("plan/{plan_id}"),
                Self::envelope(&plan_id),
            ),
            plan_id,
        }
    }

    /// Creates a plan and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(client: &RestClient, plan_id: impl Display) -> Result<Self, ResourceError> {
        let mut plan = Self::new(client, plan_id);
        plan.get().await?;
        Ok(plan)
    }

    /// Creates a plan from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        plan_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let plan_id = plan_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("plan/{plan_id}"),
                Self::envelope(&plan_id),
                properties,
            ),
            plan_id,
        }
    }

    /// The plan id.
    #[must_use]
    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    /// Builds plans from a `{"plans": {id: {...}, ...}}` body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the body has no `plans` object.
    pub fn array_from_json(
        client: &RestClient,
        _ids: &IdContext,
        json: &str,
    ) -> Result<Vec<Self>, ResourceError> {
        let value: Value = serde_json::from_str(json)?;
        let plans = match value {
            Value::Object(mut map) => map
                .remove("plans")
                .ok_or_else(|| ResourceError::missing(Self::NAME, "plans"))?,
            _ => {
                return Err(ResourceError::UnexpectedBody {
                    resource: Self::NAME,
                    expected: "a JSON object",
                })
            }
        };

        let Value::Object(plans) = plans else {
            return Err(ResourceError::UnexpectedBody {
                resource: Self::NAME,
                expected: "an object named 'plans' keyed by plan id",
            });
        };

        plans
            .into_iter()
            .map(|(plan_id, properties)| match properties {
                Value::Object(properties) => Ok(Self::from_properties(client, plan_id, properties)),
                _ => Err(ResourceError::UnexpectedBody {
                    resource: Self::NAME,
                    expected: "plan properties as a JSON object",
                }),
            })
            .collect()
    }
}

impl CloudResource for Plan {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

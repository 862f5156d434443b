use super::types::{AttributeError, AttributeMap, AttributeValue, Schema};
use tracing::trace;

/// Attribute store for one data source instance
///
/// Inputs are supplied through [`set_input`](Self::set_input) before the read;
/// the read fills computed attributes through [`set`](Self::set). Every write
/// is checked against the schema.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Schema,
    id: Option<String>,
    values: AttributeMap,
}

impl ResourceData {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            id: None,
            values: AttributeMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Supply a configuration input (a non-computed attribute)
    pub fn set_input(
        &mut self,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<(), AttributeError> {
        let schema = self
            .schema
            .get(key)
            .ok_or_else(|| AttributeError::UnknownAttribute(key.to_string()))?;
        if schema.computed && !schema.required {
            return Err(AttributeError::NotInput(key.to_string()));
        }

        let value = value.into();
        value.check(key, schema.kind)?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Write a computed attribute
    pub fn set(&mut self, key: &str, value: impl Into<AttributeValue>) -> Result<(), AttributeError> {
        let schema = self
            .schema
            .get(key)
            .ok_or_else(|| AttributeError::UnknownAttribute(key.to_string()))?;
        if !schema.computed {
            return Err(AttributeError::NotComputed(key.to_string()));
        }

        let value = value.into();
        value.check(key, schema.kind)?;
        trace!(key = %key, kind = value.kind_name(), "Setting attribute");
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Verify every required input has been supplied
    pub fn validate_inputs(&self) -> Result<(), AttributeError> {
        match self
            .schema
            .required_attributes()
            .find(|name| !self.values.contains_key(*name))
        {
            Some(missing) => Err(AttributeError::MissingRequired(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_str)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.values
    }

    /// Flatten into the host engine's map, with `id` alongside the attributes
    pub fn into_attributes(self) -> AttributeMap {
        let mut values = self.values;
        if let Some(id) = self.id {
            values.insert("id".to_string(), AttributeValue::String(id));
        }
        values
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.clone().into_attributes())
    }
}

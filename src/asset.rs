use std::collections::BTreeSet;
use std::sync::Arc;

use crate::ast::Node;
use crate::compiler::parse_program;
use crate::eval::EvalContext;
use crate::foundation::error::{AnimExprError, AnimExprResult};
use crate::tween::{ChannelKind, ChannelValues};

/// A stored animation expression together with the names it refers to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationExpression {
    #[serde(default)]
    pub object_maps: Vec<ObjectMap>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    pub expression: String,
}

/// Alias from a name used in the expression to a host object path.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObjectMap {
    pub name: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: f64,
}

impl AnimationExpression {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            object_maps: Vec::new(),
            variables: Vec::new(),
            expression: expression.into(),
        }
    }

    pub fn from_json_str(s: &str) -> AnimExprResult<Self> {
        serde_json::from_str(s).map_err(|e| AnimExprError::config(format!("invalid asset json: {e}")))
    }

    pub fn to_json_string(&self) -> AnimExprResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnimExprError::config(format!("failed to serialize asset: {e}")))
    }

    pub fn validate(&self) -> AnimExprResult<()> {
        let mut seen = BTreeSet::new();
        for m in &self.object_maps {
            if m.name.trim().is_empty() {
                return Err(AnimExprError::config("object map name must be non-empty"));
            }
            if !seen.insert(m.name.as_str()) {
                return Err(AnimExprError::config(format!(
                    "duplicate object map name '{}'",
                    m.name
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for v in &self.variables {
            if v.name.trim().is_empty() {
                return Err(AnimExprError::config("variable name must be non-empty"));
            }
            if !seen.insert(v.name.as_str()) {
                return Err(AnimExprError::config(format!(
                    "duplicate variable name '{}'",
                    v.name
                )));
            }
            if !v.value.is_finite() {
                return Err(AnimExprError::config(format!(
                    "variable '{}' must be finite",
                    v.name
                )));
            }
        }
        Ok(())
    }

    /// Host path for `name`; names without an alias are their own path.
    pub fn resolve_path<'a>(&'a self, name: &'a str) -> &'a str {
        self.object_maps
            .iter()
            .find(|m| m.name == name)
            .map_or(name, |m| m.path.as_str())
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
    }

    #[tracing::instrument(level = "debug", skip(self), fields(len = self.expression.len()))]
    pub fn compile(&self) -> AnimExprResult<Node> {
        parse_program(&self.expression)
    }

    /// Compile and evaluate against `host`, with this asset's aliases and variables layered
    /// over it. `Then` bodies resume under the same layering.
    pub fn run<C: EvalContext>(&self, host: &C) -> AnimExprResult<()> {
        self.validate()?;
        let program = self.compile()?;
        tracing::debug!(
            object_maps = self.object_maps.len(),
            variables = self.variables.len(),
            "running asset"
        );
        program.evaluate(&AssetContext::new(self, host.clone()))
    }
}

/// Host context scoped to one asset.
///
/// Object names go through [`AnimationExpression::resolve_path`] before reaching the host.
/// Variables come from the host first, then from the asset's own table.
#[derive(Clone)]
pub struct AssetContext<C> {
    asset: Arc<AnimationExpression>,
    host: C,
}

impl<C: EvalContext> AssetContext<C> {
    pub fn new(asset: &AnimationExpression, host: C) -> Self {
        Self {
            asset: Arc::new(asset.clone()),
            host,
        }
    }
}

impl<C: EvalContext> EvalContext for AssetContext<C> {
    type Object = C::Object;
    type Tween = C::Tween;

    fn resolve_object(&self, name: &str) -> AnimExprResult<C::Object> {
        self.host.resolve_object(self.asset.resolve_path(name))
    }

    fn resolve_variable(&self, name: &str) -> Option<f64> {
        self.host
            .resolve_variable(name)
            .or_else(|| self.asset.variable(name))
    }

    fn set_active(&self, object: &C::Object, active: bool) {
        self.host.set_active(object, active);
    }

    fn on_callback(&self) {
        self.host.on_callback();
    }

    fn create_tween(
        &self,
        object: &C::Object,
        channel: ChannelKind,
        duration: f64,
        to: Option<ChannelValues>,
    ) -> AnimExprResult<C::Tween> {
        self.host.create_tween(object, channel, duration, to)
    }
}

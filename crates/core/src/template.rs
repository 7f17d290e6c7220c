// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jinja2-style template engine.
//!
//! Used for both generated job configuration files and the markup
//! fragments embedded in status messages. Templates use minijinja syntax:
//!
//! - Variable interpolation: `{{ event_id }}`, `{{ ifo.channel }}`
//! - Loops: `{% for ifo in ifos %}...{% endfor %}`
//! - Filters: `{{ names | join(",") }}`
//!
//! Undefined variables are an error, so a template that references an
//! attribute the caller did not supply fails instead of rendering blanks.

use minijinja::{Environment, UndefinedBehavior, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during template rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template syntax error
    #[error("template syntax error: {0}")]
    Syntax(String),

    /// Undefined variable
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Render error
    #[error("render error: {0}")]
    Render(String),
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        let msg = err.to_string();
        match err.kind() {
            minijinja::ErrorKind::UndefinedError => TemplateError::UndefinedVariable(msg),
            minijinja::ErrorKind::SyntaxError => TemplateError::Syntax(msg),
            _ => TemplateError::Render(msg),
        }
    }
}

/// Template engine for configuration files and message fragments.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    fn create_env(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env
    }

    /// Render a template string with the given context.
    pub fn render(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        let env = self.create_env();
        let tmpl = env.template_from_str(template)?;
        let result = tmpl.render(context.to_value())?;
        Ok(result)
    }
}

/// Template context (variable bindings).
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: BTreeMap<String, ContextValue>,
}

/// A value in the template context.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    String(String),
    Float(f64),
    List(Vec<ContextValue>),
    Object(BTreeMap<String, ContextValue>),
}

impl ContextValue {
    /// Build an object from string pairs
    pub fn object<'a>(pairs: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        ContextValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), ContextValue::String(v)))
                .collect(),
        )
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string value to the context.
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), ContextValue::String(value.into()));
        self
    }

    /// Add a float value to the context.
    pub fn with_float(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), ContextValue::Float(value));
        self
    }

    /// Add a list value to the context.
    pub fn with_list(mut self, key: impl Into<String>, value: Vec<ContextValue>) -> Self {
        self.values.insert(key.into(), ContextValue::List(value));
        self
    }

    fn to_value(&self) -> Value {
        context_value_to_minijinja(&ContextValue::Object(self.values.clone()))
    }
}

fn context_value_to_minijinja(cv: &ContextValue) -> Value {
    match cv {
        ContextValue::String(s) => Value::from(s.clone()),
        ContextValue::Float(f) => Value::from(*f),
        ContextValue::List(list) => Value::from(
            list.iter()
                .map(context_value_to_minijinja)
                .collect::<Vec<_>>(),
        ),
        ContextValue::Object(obj) => Value::from_iter(
            obj.iter()
                .map(|(k, v)| (k.clone(), context_value_to_minijinja(v))),
        ),
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

//! Prompt backing functions.
//!
//! A [`PromptFunction`] pairs a callable with the metadata a prompt is built
//! from: its identifier, an optional description and title, and the argument
//! schema. The schema is either declared by hand or derived from a typed
//! argument struct through `schemars`.

use async_trait::async_trait;
use rmcp::handler::server::prompt::cached_arguments_from_schema;
use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::any::type_name;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use super::arguments::PromptArguments;
use super::output::RenderOutput;

/// Object-safe handle to a prompt's backing function.
#[async_trait]
pub trait PromptHandler: Send + Sync {
    /// Invoke the function with the supplied arguments.
    async fn call(&self, arguments: PromptArguments) -> anyhow::Result<RenderOutput>;
}

struct SyncHandler<F, R, E> {
    f: F,
    _marker: PhantomData<fn() -> (R, E)>,
}

#[async_trait]
impl<F, R, E> PromptHandler for SyncHandler<F, R, E>
where
    F: Fn(PromptArguments) -> Result<R, E> + Send + Sync + 'static,
    R: Into<RenderOutput> + 'static,
    E: Into<anyhow::Error> + 'static,
{
    async fn call(&self, arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        (self.f)(arguments).map(Into::into).map_err(Into::into)
    }
}

struct AsyncHandler<F, Fut, R, E> {
    f: F,
    _marker: PhantomData<fn() -> (Fut, R, E)>,
}

#[async_trait]
impl<F, Fut, R, E> PromptHandler for AsyncHandler<F, Fut, R, E>
where
    F: Fn(PromptArguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Into<RenderOutput> + 'static,
    E: Into<anyhow::Error> + 'static,
{
    async fn call(&self, arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
        (self.f)(arguments).await.map(Into::into).map_err(Into::into)
    }
}

/// A callable plus the metadata needed to turn it into a prompt.
#[derive(Clone)]
pub struct PromptFunction {
    pub(crate) name: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) arguments: Vec<PromptArgument>,
    pub(crate) handler: Arc<dyn PromptHandler>,
}

impl PromptFunction {
    /// Wrap a synchronous function taking the raw argument set.
    ///
    /// The name defaults to the function's identifier; closures have none and
    /// must be given one with [`PromptFunction::named`] or at registration.
    pub fn from_fn<F, R, E>(f: F) -> Self
    where
        F: Fn(PromptArguments) -> Result<R, E> + Send + Sync + 'static,
        R: Into<RenderOutput> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        Self::from_handler(
            function_name::<F>(),
            SyncHandler {
                f,
                _marker: PhantomData::<fn() -> (R, E)>,
            },
        )
    }

    /// Wrap an async function taking the raw argument set.
    pub fn from_async_fn<F, Fut, R, E>(f: F) -> Self
    where
        F: Fn(PromptArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Into<RenderOutput> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        Self::from_handler(
            function_name::<F>(),
            AsyncHandler {
                f,
                _marker: PhantomData::<fn() -> (Fut, R, E)>,
            },
        )
    }

    /// Wrap a synchronous function taking a typed argument struct.
    ///
    /// The argument schema is derived from `T`: `Option` and defaulted fields
    /// are optional, everything else is required.
    pub fn from_typed_fn<T, F, R, E>(f: F) -> Self
    where
        T: DeserializeOwned + JsonSchema + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
        R: Into<RenderOutput> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let name = function_name::<F>();
        let handler = SyncHandler {
            f: move |arguments: PromptArguments| -> anyhow::Result<R> {
                let parsed = arguments.deserialize::<T>()?;
                f(parsed).map_err(Into::into)
            },
            _marker: PhantomData::<fn() -> (R, anyhow::Error)>,
        };

        let mut function = Self::from_handler(name, handler);
        function.arguments = arguments_from_schema::<T>();
        function
    }

    /// Wrap an async function taking a typed argument struct.
    pub fn from_typed_async_fn<T, F, Fut, R, E>(f: F) -> Self
    where
        T: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Into<RenderOutput> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let name = function_name::<F>();
        let f = Arc::new(f);
        let handler = AsyncHandler {
            f: move |arguments: PromptArguments| {
                let f = f.clone();
                async move {
                    let parsed: T = arguments.deserialize()?;
                    let rendered: anyhow::Result<R> = f(parsed).await.map_err(Into::into);
                    rendered
                }
            },
            _marker: PhantomData::<fn() -> (_, R, anyhow::Error)>,
        };

        let mut function = Self::from_handler(name, handler);
        function.arguments = arguments_from_schema::<T>();
        function
    }

    /// Wrap an existing handler object.
    pub fn from_handler(name: Option<String>, handler: impl PromptHandler + 'static) -> Self {
        Self {
            name,
            title: None,
            description: None,
            arguments: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Set the function's own name, replacing the derived identifier.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a display title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description (the function's "docstring").
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a required argument.
    pub fn required_arg(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.argument(name, description, true)
    }

    /// Declare an optional argument.
    pub fn optional_arg(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.argument(name, description, false)
    }

    fn argument(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.arguments.push(PromptArgument {
            name: name.into(),
            title: None,
            description: Some(description.into()),
            required: Some(required),
        });
        self
    }

    /// The identifier this function would register under, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arguments(&self) -> &[PromptArgument] {
        &self.arguments
    }
}

impl std::fmt::Debug for PromptFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptFunction")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Last path segment of a callable's type name.
///
/// Only fn items carry a usable name. Closures, function pointers and boxed or
/// borrowed callables yield `None`.
fn function_name<F>() -> Option<String> {
    let full = type_name::<F>();
    let path = full.split('<').next().unwrap_or(full);

    let root = path.split("::").next().unwrap_or(path);
    let not_an_item = path.is_empty()
        || path.contains(['(', '{', '&', '*', '[', ' '])
        || matches!(root, "core" | "alloc" | "std");
    if not_an_item {
        return None;
    }

    path.rsplit("::")
        .next()
        .filter(|ident| !ident.is_empty())
        .map(str::to_string)
}

/// Prompt arguments derived from the JSON schema of `T`, in field order.
fn arguments_from_schema<T: JsonSchema + 'static>() -> Vec<PromptArgument> {
    cached_arguments_from_schema::<T>().unwrap_or_default()
}

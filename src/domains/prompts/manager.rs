//! Prompt manager implementation.
//!
//! The PromptManager owns the name → prompt mapping. The first registration
//! for a name wins: later registrations under the same name return the
//! existing entry, optionally logging a warning, and never overwrite it.

use rmcp::model::PromptMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::arguments::PromptArguments;
use super::error::PromptError;
use super::function::PromptFunction;
use super::prompt::Prompt;
use crate::core::config::PromptsConfig;

/// A registration request for [`PromptManager::add_prompt`].
///
/// Exactly one of `function` or `prompt` must be set. The `name` and
/// `description` overrides only apply to functions.
#[derive(Debug, Default)]
pub struct AddPrompt {
    pub function: Option<PromptFunction>,
    pub prompt: Option<Prompt>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl AddPrompt {
    /// Register a function.
    pub fn function(function: PromptFunction) -> Self {
        Self {
            function: Some(function),
            ..Self::default()
        }
    }

    /// Register a prebuilt prompt.
    pub fn prompt(prompt: Prompt) -> Self {
        Self {
            prompt: Some(prompt),
            ..Self::default()
        }
    }

    /// Override the registered name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the registered description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Registry of prompts keyed by name.
#[derive(Debug)]
pub struct PromptManager {
    /// Registered prompts in registration order.
    prompts: Vec<Arc<Prompt>>,

    /// Key: prompt name, Value: index into `prompts`
    index: HashMap<String, usize>,

    warn_on_duplicate: bool,
}

impl PromptManager {
    /// Create an empty manager.
    pub fn new(warn_on_duplicate: bool) -> Self {
        Self {
            prompts: Vec::new(),
            index: HashMap::new(),
            warn_on_duplicate,
        }
    }

    /// Create an empty manager from the prompts configuration.
    pub fn from_config(config: &PromptsConfig) -> Self {
        info!("Duplicate prompt warnings: {}", config.warn_on_duplicate);
        Self::new(config.warn_on_duplicate)
    }

    /// Get a prompt by name.
    pub fn get_prompt(&self, name: &str) -> Option<Arc<Prompt>> {
        self.index.get(name).map(|&i| self.prompts[i].clone())
    }

    /// List all registered prompts in registration order.
    pub fn list_prompts(&self) -> Vec<Arc<Prompt>> {
        self.prompts.clone()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Register a prompt from a request carrying either a function or a
    /// prebuilt prompt.
    ///
    /// Returns the registered entry, which is the pre-existing one when the
    /// name was already taken.
    pub fn add_prompt(&mut self, request: AddPrompt) -> Result<Arc<Prompt>, PromptError> {
        let AddPrompt {
            function,
            prompt,
            name,
            description,
        } = request;

        let prompt = match (function, prompt) {
            (Some(function), None) => {
                Prompt::from_function(function, name.as_deref(), description.as_deref())?
            }
            (None, Some(prompt)) => {
                if name.is_some() || description.is_some() {
                    return Err(PromptError::invalid_arguments(
                        "name and description overrides only apply when registering a function",
                    ));
                }
                prompt
            }
            (Some(_), Some(_)) => {
                return Err(PromptError::invalid_arguments(
                    "provide either a function or a prompt, not both",
                ));
            }
            (None, None) => {
                return Err(PromptError::invalid_arguments(
                    "either a function or a prompt must be provided",
                ));
            }
        };

        Ok(self.insert(prompt))
    }

    /// Register a function, with optional name and description overrides.
    pub fn add_function(
        &mut self,
        function: PromptFunction,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Arc<Prompt>, PromptError> {
        let prompt = Prompt::from_function(function, name, description)?;
        Ok(self.insert(prompt))
    }

    /// Register a prebuilt prompt.
    pub fn add(&mut self, prompt: Prompt) -> Arc<Prompt> {
        self.insert(prompt)
    }

    fn insert(&mut self, prompt: Prompt) -> Arc<Prompt> {
        if let Some(existing) = self.get_prompt(prompt.name()) {
            if self.warn_on_duplicate {
                warn!("Prompt already exists: {}", prompt.name());
            }
            return existing;
        }

        info!("Registering prompt: {}", prompt.name());
        let prompt = Arc::new(prompt);
        self.index
            .insert(prompt.name().to_string(), self.prompts.len());
        self.prompts.push(prompt.clone());
        prompt
    }

    /// Render a prompt by name with arguments.
    pub async fn render_prompt(
        &self,
        name: &str,
        arguments: Option<PromptArguments>,
    ) -> Result<Vec<PromptMessage>, PromptError> {
        let prompt = self
            .get_prompt(name)
            .ok_or_else(|| PromptError::unknown_prompt(name))?;

        prompt.render(arguments).await
    }
}

impl Default for PromptManager {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::{PromptHandler, RenderOutput};
    use async_trait::async_trait;
    use rmcp::model::{PromptMessageContent, PromptMessageRole};
    use std::io::Write;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tracing_subscriber::fmt::MakeWriter;

    fn hello_world(_arguments: PromptArguments) -> anyhow::Result<&'static str> {
        Ok("Hello, world!")
    }

    fn goodbye_world(_arguments: PromptArguments) -> anyhow::Result<&'static str> {
        Ok("Goodbye, world!")
    }

    fn greet(arguments: PromptArguments) -> anyhow::Result<String> {
        Ok(format!("Hello, {}!", arguments.require_str("name")?))
    }

    fn greet_function() -> PromptFunction {
        PromptFunction::from_fn(greet).required_arg("name", "Who to greet")
    }

    fn text_of(message: &PromptMessage) -> &str {
        match &message.content {
            PromptMessageContent::Text { text } => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    /// In-memory log sink used to assert on warnings.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
        capture_logs(tracing::Level::WARN, f)
    }

    fn capture_logs<R>(level: tracing::Level, f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(level)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    #[test]
    fn test_add_prompt() {
        let mut manager = PromptManager::default();
        let added = manager
            .add_prompt(AddPrompt::function(PromptFunction::from_fn(hello_world)))
            .unwrap();

        assert_eq!(added.name(), "hello_world");
        assert_eq!(added.description(), "");
        assert_eq!(manager.list_prompts().len(), 1);
    }

    #[test]
    fn test_add_prompt_with_name() {
        let mut manager = PromptManager::default();
        let added = manager
            .add_prompt(AddPrompt::function(PromptFunction::from_fn(hello_world)).name("greeting"))
            .unwrap();

        assert_eq!(added.name(), "greeting");
        assert_eq!(added.description(), "");
        assert!(manager.get_prompt("hello_world").is_none());
        assert!(manager.get_prompt("greeting").is_some());
    }

    #[test]
    fn test_add_prompt_with_description() {
        let function = PromptFunction::from_fn(hello_world).description("A greeting prompt.");

        let mut manager = PromptManager::default();
        let added = manager
            .add_function(function, None, Some("A custom greeting"))
            .unwrap();

        assert_eq!(added.name(), "hello_world");
        assert_eq!(added.description(), "A custom greeting");
    }

    #[test]
    fn test_add_prebuilt_prompt() {
        struct Static;

        #[async_trait]
        impl PromptHandler for Static {
            async fn call(&self, _arguments: PromptArguments) -> anyhow::Result<RenderOutput> {
                Ok(RenderOutput::from("static"))
            }
        }

        let mut manager = PromptManager::default();
        let added = manager
            .add_prompt(AddPrompt::prompt(Prompt::new("static", "Fixed text", vec![], Static)))
            .unwrap();

        assert_eq!(added.name(), "static");
        assert_eq!(added.description(), "Fixed text");
    }

    #[test]
    fn test_add_prompt_requires_exactly_one_source() {
        let mut manager = PromptManager::default();

        let neither = manager.add_prompt(AddPrompt::default());
        assert!(matches!(neither, Err(PromptError::InvalidArguments(_))));

        let prompt = Prompt::from_function(PromptFunction::from_fn(hello_world), None, None).unwrap();
        let both = manager.add_prompt(AddPrompt {
            function: Some(PromptFunction::from_fn(goodbye_world)),
            prompt: Some(prompt.clone()),
            ..AddPrompt::default()
        });
        assert!(matches!(both, Err(PromptError::InvalidArguments(_))));

        let overridden = manager.add_prompt(AddPrompt::prompt(prompt).name("renamed"));
        assert!(matches!(overridden, Err(PromptError::InvalidArguments(_))));

        assert!(manager.is_empty());
    }

    #[test]
    fn test_add_unnamed_closure_requires_name() {
        let mut manager = PromptManager::default();
        let closure = PromptFunction::from_fn(|_args: PromptArguments| anyhow::Ok("hi"));

        let err = manager.add_function(closure.clone(), None, None).unwrap_err();
        assert!(matches!(err, PromptError::InvalidArguments(_)));

        let added = manager.add_function(closure, Some("hi"), None).unwrap();
        assert_eq!(added.name(), "hi");
    }

    #[test]
    fn test_add_fn_pointers_requires_name() {
        fn first(_arguments: PromptArguments) -> anyhow::Result<String> {
            Ok("first".to_string())
        }
        fn second(_arguments: PromptArguments) -> anyhow::Result<String> {
            Ok("second".to_string())
        }

        type Render = fn(PromptArguments) -> anyhow::Result<String>;
        type Boxed = Box<dyn Fn(PromptArguments) -> anyhow::Result<String> + Send + Sync>;

        let mut manager = PromptManager::default();
        for function in [
            PromptFunction::from_fn(first as Render),
            PromptFunction::from_fn(second as Render),
            PromptFunction::from_fn(Box::new(first) as Boxed),
            PromptFunction::from_fn(Box::new(second) as Boxed),
        ] {
            let err = manager.add_function(function, None, None).unwrap_err();
            assert!(matches!(err, PromptError::InvalidArguments(_)));
        }
        assert!(manager.is_empty());

        manager
            .add_function(PromptFunction::from_fn(first as Render), Some("first"), None)
            .unwrap();
        manager
            .add_function(PromptFunction::from_fn(second as Render), Some("second"), None)
            .unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_add_duplicate_prompt() {
        let mut manager = PromptManager::default();

        let ((first, second), logs) = capture_warnings(|| {
            let first = manager
                .add_function(PromptFunction::from_fn(hello_world), None, None)
                .unwrap();
            let second = manager
                .add_function(PromptFunction::from_fn(hello_world), None, None)
                .unwrap();
            (first, second)
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &manager.get_prompt("hello_world").unwrap()));
        assert_eq!(manager.list_prompts().len(), 1);
        assert_eq!(logs.matches("Prompt already exists: hello_world").count(), 1);
    }

    #[test]
    fn test_duplicate_never_overwrites() {
        let mut manager = PromptManager::new(false);
        manager
            .add_function(PromptFunction::from_fn(hello_world), Some("fn"), None)
            .unwrap();
        let kept = manager
            .add_function(
                PromptFunction::from_fn(goodbye_world),
                Some("fn"),
                Some("Should be ignored"),
            )
            .unwrap();

        assert_eq!(kept.description(), "");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_disable_warn_on_duplicate_prompts() {
        let mut manager = PromptManager::new(false);

        let ((first, second), logs) = capture_warnings(|| {
            let first = manager
                .add_function(PromptFunction::from_fn(hello_world), None, None)
                .unwrap();
            let second = manager
                .add_function(PromptFunction::from_fn(hello_world), None, None)
                .unwrap();
            (first, second)
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.list_prompts().len(), 1);
        assert!(!logs.contains("Prompt already exists"));
    }

    #[test]
    fn test_from_config() {
        let config = PromptsConfig {
            warn_on_duplicate: false,
        };
        let (manager, logs) =
            capture_logs(tracing::Level::INFO, || PromptManager::from_config(&config));
        assert!(!manager.warn_on_duplicate);
        assert!(logs.contains("Duplicate prompt warnings: false"));
    }

    #[test]
    fn test_list_prompts() {
        let mut manager = PromptManager::default();
        let first = manager
            .add_function(PromptFunction::from_fn(hello_world), None, None)
            .unwrap();
        let second = manager
            .add_function(PromptFunction::from_fn(goodbye_world), None, None)
            .unwrap();

        let prompts = manager.list_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(Arc::ptr_eq(&prompts[0], &first));
        assert!(Arc::ptr_eq(&prompts[1], &second));
    }

    #[test]
    fn test_list_prompts_counts_distinct_names() {
        let mut manager = PromptManager::new(false);
        for name in ["a", "b", "a", "c", "b", "a"] {
            manager
                .add_function(PromptFunction::from_fn(hello_world), Some(name), None)
                .unwrap();
        }

        let names: Vec<_> = manager
            .list_prompts()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_prompts_is_a_snapshot() {
        let mut manager = PromptManager::default();
        manager
            .add_function(PromptFunction::from_fn(hello_world), None, None)
            .unwrap();

        let mut snapshot = manager.list_prompts();
        snapshot.clear();
        assert_eq!(manager.list_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_render_prompt() {
        let mut manager = PromptManager::default();
        manager
            .add_function(PromptFunction::from_fn(hello_world), Some("fn"), None)
            .unwrap();

        let messages = manager.render_prompt("fn", None).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, PromptMessageRole::User);
        assert_eq!(text_of(&messages[0]), "Hello, world!");
    }

    #[tokio::test]
    async fn test_render_prompt_with_args() {
        let mut manager = PromptManager::default();
        manager.add_function(greet_function(), None, None).unwrap();

        let arguments = PromptArguments::new().with("name", "Alice");
        let messages = manager.render_prompt("greet", Some(arguments)).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, PromptMessageRole::User);
        assert_eq!(text_of(&messages[0]), "Hello, Alice!");
    }

    #[tokio::test]
    async fn test_render_prompt_with_missing_args() {
        let mut manager = PromptManager::default();
        manager.add_function(greet_function(), None, None).unwrap();

        let err = manager
            .render_prompt("greet", Some(PromptArguments::new()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Missing required arguments"));
        assert!(matches!(err, PromptError::MissingArguments(ref names) if names == &["name"]));
    }

    #[tokio::test]
    async fn test_render_unknown_prompt() {
        let manager = PromptManager::default();

        let err = manager.render_prompt("missing-name", None).await.unwrap_err();
        assert!(matches!(err, PromptError::UnknownPrompt(ref name) if name == "missing-name"));
        assert_eq!(err.to_string(), "Unknown prompt: missing-name");
    }

    #[tokio::test]
    async fn test_render_propagates_failure_unchanged() {
        let mut manager = PromptManager::default();
        let failing = PromptFunction::from_async_fn(|_args: PromptArguments| async {
            Err::<String, _>(anyhow::anyhow!("backend timed out"))
        });
        manager.add_function(failing, Some("failing"), None).unwrap();

        let err = manager.render_prompt("failing", None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error rendering prompt failing: backend timed out"
        );
    }

    /// Sets its flag when dropped.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_cancelled_render_drops_callable_future() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = dropped.clone();
        let stalled = PromptFunction::from_async_fn(move |_args: PromptArguments| {
            let flag = flag.clone();
            async move {
                let _guard = DropFlag(flag);
                std::future::pending::<()>().await;
                anyhow::Ok("unreachable")
            }
        });

        let mut manager = PromptManager::default();
        manager.add_function(stalled, Some("stalled"), None).unwrap();

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            manager.render_prompt("stalled", None),
        )
        .await;

        assert!(result.is_err());
        assert!(dropped.load(Ordering::SeqCst));
    }
}

//! Resolvable units and their declared inputs

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::arguments::Arguments;
use super::artifact::Classification;
use super::continuation::Continuation;
use super::value::Value;
use crate::constants::CONTINUATION_PARAM;
use crate::error::Result;

/// What a producer or target hands back: a value, nothing, or an error
pub type ProducerOutcome = Result<Option<Value>>;

/// Body that returns its outcome directly
pub type ReturningFn = dyn Fn(Arguments) -> ProducerOutcome + Send + Sync;

/// Body that completes through a [`Continuation`], now or later
pub type DeferredFn = dyn Fn(Arguments, Continuation) + Send + Sync;

/// Body that returns a future of its outcome
pub type FutureFn = dyn Fn(Arguments) -> BoxFuture<'static, ProducerOutcome> + Send + Sync;

/// How a callable delivers its outcome
#[derive(Clone)]
pub enum Body {
    /// Synchronous return
    Returning(Arc<ReturningFn>),
    /// Completion through the reserved continuation parameter
    Deferred(Arc<DeferredFn>),
    /// Asynchronous return
    Future(Arc<FutureFn>),
}

impl Body {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Returning(_) => "returning",
            Self::Deferred(_) => "deferred",
            Self::Future(_) => "future",
        }
    }
}

/// A resolvable unit: a name, the ordered names of its inputs, and a body
///
/// Inputs are declared as data rather than discovered from source. A deferred
/// callable always ends its declaration with [`CONTINUATION_PARAM`].
///
/// # Example
///
/// ```
/// use darkmagic_domain::value_objects::{Callable, Value};
///
/// let answer = Callable::returning("answer", Vec::<String>::new(), |_| Ok(Some(Value::new(42u32))));
/// assert!(answer.parameters().is_empty());
/// ```
#[derive(Clone)]
pub struct Callable {
    name: String,
    parameters: Vec<String>,
    body: Body,
    classification: Option<Classification>,
}

impl Callable {
    /// Callable whose body returns its outcome
    pub fn returning<N, I, P, F>(name: N, parameters: I, body: F) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
        F: Fn(Arguments) -> ProducerOutcome + Send + Sync + 'static,
    {
        Self::with_body(name, parameters, Body::Returning(Arc::new(body)))
    }

    /// Callable that completes through a continuation
    pub fn deferred<N, I, P, F>(name: N, parameters: I, body: F) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
        F: Fn(Arguments, Continuation) + Send + Sync + 'static,
    {
        let mut callable = Self::with_body(name, parameters, Body::Deferred(Arc::new(body)));
        if callable.parameters.last().map(String::as_str) != Some(CONTINUATION_PARAM) {
            callable.parameters.push(CONTINUATION_PARAM.to_string());
        }
        callable
    }

    /// Callable whose body is asynchronous
    pub fn future<N, I, P, F, Fut>(name: N, parameters: I, body: F) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerOutcome> + Send + 'static,
    {
        let body: Arc<FutureFn> = Arc::new(move |args| Box::pin(body(args)));
        Self::with_body(name, parameters, Body::Future(body))
    }

    fn with_body<N, I, P>(name: N, parameters: I, body: Body) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            body,
            classification: None,
        }
    }

    /// Tag the callable with an explicit classification
    ///
    /// An explicit tag takes precedence over naming conventions.
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Exported name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared input names, in order, including a trailing continuation
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Explicit classification, if one was given
    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("body", &self.body.kind())
            .field("classification", &self.classification)
            .finish()
    }
}

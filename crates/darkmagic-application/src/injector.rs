//! Resolution engine
//!
//! Resolves a target's declared inputs in order, producing whatever is
//! missing, invokes the target once every input is in place, and caches what
//! producers return.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use darkmagic_domain::error::{Error, Result};
use darkmagic_domain::ports::SharedArtifactLoader;
use darkmagic_domain::value_objects::{
    Arguments, Artifact, Body, Callable, Continuation, LoadedArtifact, Locator, Origin,
    ProducerOutcome, Value,
};

use crate::descriptor::{Descriptor, InjectPolicy, is_optional_request, normalize_name};
use crate::lineage::Lineage;
use crate::options::{InjectorOptions, Override};
use crate::registry::Registry;
use crate::signature::{Signature, validate_parameter_name};
use crate::waterfall::Waterfall;

struct Inner {
    loader: SharedArtifactLoader,
    registry: Registry,
    search_paths: ArcSwap<Vec<PathBuf>>,
    policy: InjectPolicy,
    overrides: BTreeMap<String, Override>,
}

/// Dependency injector
///
/// Cheap to clone; clones share one registry. Safe to drive from several
/// tasks at once: each name is produced at most once per registry lifetime.
///
/// # Example
///
/// ```ignore
/// let injector = Injector::builder(loader).search_path("./lib").build()?;
/// let answer = injector
///     .inject(Callable::returning("main", ["config"], |args| {
///         let config = args.get::<serde_json::Value>("config")?;
///         Ok(Some(Value::new(config["port"].clone())))
///     }))
///     .await?;
/// ```
#[derive(Clone)]
pub struct Injector {
    inner: Arc<Inner>,
}

/// How one input slot gets its value
enum Slot {
    /// Known without invoking anything
    Ready(Option<Value>),
    /// Loaded artifact handed over without being invoked
    Loaded(Artifact),
    /// Requires invoking a producer
    Produce {
        descriptor: Descriptor,
        producer: Arc<Callable>,
        parent: Lineage,
    },
}

impl Injector {
    /// Create an injector
    ///
    /// Fails when an override is keyed by a name no parameter could carry.
    pub fn new(loader: SharedArtifactLoader, options: InjectorOptions) -> Result<Self> {
        for name in options.overrides.keys() {
            validate_parameter_name(name)?;
        }

        info!(
            loader = loader.loader_name(),
            search_paths = options.search_paths.len(),
            overrides = options.overrides.len(),
            auto_inject_local = options.policy.auto_inject_local_factories,
            auto_inject_external = options.policy.auto_inject_external_factories,
            "injector created"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                loader,
                registry: Registry::new(),
                search_paths: ArcSwap::from_pointee(options.search_paths),
                policy: options.policy,
                overrides: options.overrides,
            }),
        })
    }

    /// Start building an injector around `loader`
    pub fn builder(loader: SharedArtifactLoader) -> InjectorBuilder {
        InjectorBuilder {
            loader,
            options: InjectorOptions::default(),
        }
    }

    /// Resolve the inputs of `target`, invoke it and return its outcome
    ///
    /// A plain value cannot be injected and fails with `NotCallable`.
    pub async fn inject<T: Into<Artifact>>(&self, target: T) -> ProducerOutcome {
        match target.into() {
            Artifact::Callable(callable) => self.resolve(callable, Lineage::root()).await,
            Artifact::Value(value) => Err(Error::not_callable(value.type_name())),
        }
    }

    /// Inject on a spawned task and hand the outcome to `on_complete`
    ///
    /// Must be called from within a tokio runtime.
    pub fn inject_with<T, F>(&self, target: T, on_complete: F) -> JoinHandle<()>
    where
        T: Into<Artifact>,
        F: FnOnce(ProducerOutcome) + Send + 'static,
    {
        let injector = self.clone();
        let target = target.into();
        tokio::spawn(async move { on_complete(injector.inject(target).await) })
    }

    /// Resolve `name` the way an input slot would, invoking it if callable
    ///
    /// Registered and cached values are returned as-is, and producers go
    /// through the same gate and cache as injected inputs. A callable the
    /// policy would hand over is still invoked, but its outcome is not
    /// cached.
    pub async fn inject_named(&self, name: &str) -> ProducerOutcome {
        validate_parameter_name(name)?;
        let root = Lineage::root();

        match self.prepare(name, None, &root).await? {
            Slot::Ready(value) => Ok(value),
            Slot::Produce {
                descriptor,
                producer,
                parent,
            } => self.produce(descriptor, producer, parent).await,
            Slot::Loaded(Artifact::Callable(callable)) => {
                self.resolve(callable, root.push(normalize_name(name))).await
            }
            Slot::Loaded(Artifact::Value(value)) => Ok(Some(value)),
        }
    }

    /// Register a descriptor by hand
    pub fn add_dependency(&self, descriptor: Descriptor) -> Result<()> {
        self.inner.registry.add(descriptor)
    }

    /// Register a ready value under `name`
    pub fn add_value(&self, name: &str, value: Value) -> Result<()> {
        validate_parameter_name(name)?;
        self.add_dependency(Descriptor::explicit(name, value).with_policy(self.inner.policy))
    }

    /// Forget `name` so that the next request loads and produces it afresh
    pub fn remove_dependency(&self, name: &str) -> Option<Descriptor> {
        let removed = self.inner.registry.remove(name)?;
        if let Some(locator) = removed.locator() {
            self.inner.loader.evict(locator);
        }
        debug!(dependency = removed.name(), "dependency evicted");
        Some(removed)
    }

    /// Snapshot of the descriptor registered for `name`
    pub fn get_dependency(&self, name: &str) -> Option<Descriptor> {
        self.inner.registry.get(name)
    }

    /// Prepend a search path; it takes priority over every existing one
    pub fn add_search_path<P: Into<PathBuf>>(&self, path: P) {
        let path = path.into();
        debug!(path = %path.display(), "search path added");
        self.inner.search_paths.rcu(|paths| {
            let mut next = Vec::with_capacity(paths.len() + 1);
            next.push(path.clone());
            next.extend(paths.iter().cloned());
            next
        });
    }

    /// Current search paths, highest priority first
    pub fn search_paths(&self) -> Vec<PathBuf> {
        (*self.inner.search_paths.load_full()).clone()
    }

    /// Auto-injection policy
    pub fn policy(&self) -> InjectPolicy {
        self.inner.policy
    }

    /// Registry backing this injector
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Loader backing this injector
    pub fn loader(&self) -> &SharedArtifactLoader {
        &self.inner.loader
    }

    fn resolve(&self, target: Arc<Callable>, lineage: Lineage) -> BoxFuture<'_, ProducerOutcome> {
        async move {
            let signature = Signature::of(&target)?;

            if signature.is_nullary() {
                trace!(target = signature.target(), "no inputs, invoking after one turn");
                tokio::task::yield_now().await;
                return invoke(&target, Arguments::empty(signature.target())).await;
            }

            debug!(
                target = signature.target(),
                inputs = signature.len(),
                depth = lineage.len(),
                "resolving inputs"
            );

            let (fired_tx, fired_rx) = oneshot::channel();
            let mut barrier = Waterfall::new(signature.len(), move |outcome| {
                let _ = fired_tx.send(outcome);
            });
            let mut pending = FuturesUnordered::new();

            for (index, requested) in signature.parameters().iter().enumerate() {
                match self.prepare(requested, Some(signature.target()), &lineage).await {
                    Ok(Slot::Ready(value)) => {
                        barrier.complete(index, Ok(value));
                    }
                    Ok(Slot::Loaded(artifact)) => {
                        barrier.complete(index, Ok(Some(artifact.into_value())));
                    }
                    Ok(Slot::Produce {
                        descriptor,
                        producer,
                        parent,
                    }) => {
                        pending.push(
                            self.produce(descriptor, producer, parent)
                                .map(move |outcome| (index, outcome))
                                .boxed(),
                        );
                    }
                    Err(error) => {
                        barrier.complete(index, Err(error));
                        break;
                    }
                }
            }

            while !barrier.is_fired() {
                let Some((index, outcome)) = pending.next().await else {
                    break;
                };
                barrier.complete(index, outcome);
            }
            if !pending.is_empty() {
                trace!(
                    target = signature.target(),
                    dropped = pending.len(),
                    "barrier fired, dropping in-flight inputs"
                );
            }
            drop(pending);

            let values = fired_rx.await.map_err(|_| {
                Error::internal(format!(
                    "inputs of {} were never completed",
                    signature.target()
                ))
            })??;

            let arguments = Arguments::new(
                signature.target(),
                signature.parameters().to_vec(),
                values,
            );
            invoke(&target, arguments).await
        }
        .boxed()
    }

    async fn prepare(
        &self,
        requested: &str,
        requester: Option<&str>,
        lineage: &Lineage,
    ) -> Result<Slot> {
        let name = normalize_name(requested);
        let registry = &self.inner.registry;

        let descriptor = registry
            .get(name)
            .unwrap_or_else(|| Descriptor::new(requested, self.inner.policy));

        if let Some(value) = descriptor.cached_artifact() {
            trace!(dependency = name, "cached");
            return Ok(Slot::Ready(Some(value.clone())));
        }

        let Some(loaded) = self.load(&descriptor).await? else {
            if is_optional_request(requested) {
                debug!(dependency = name, ?requester, "optional dependency absent");
                return Ok(Slot::Ready(None));
            }
            return Err(Error::missing_dependency(
                name,
                requester.map(str::to_string),
                !lineage.is_empty(),
            ));
        };

        let descriptor = if descriptor.origin() == Origin::Unresolved {
            let bound = registry.bind(descriptor, &loaded);
            debug!(
                dependency = name,
                origin = %bound.origin(),
                classification = %bound.classification(),
                "dependency loaded"
            );
            bound
        } else {
            descriptor
        };

        if descriptor.is_injectable()
            && let Artifact::Callable(producer) = &loaded.artifact
        {
            if lineage.contains(name) {
                return Err(Error::circular_dependency(name, lineage.names()));
            }
            return Ok(Slot::Produce {
                producer: Arc::clone(producer),
                descriptor,
                parent: lineage.clone(),
            });
        }

        Ok(Slot::Loaded(loaded.artifact))
    }

    /// Find the artifact for a descriptor: overrides, then the recorded
    /// locator, then a search
    async fn load(&self, descriptor: &Descriptor) -> Result<Option<LoadedArtifact>> {
        let name = descriptor.name();
        let loader = &self.inner.loader;

        if let Some(entry) = self.inner.overrides.get(name) {
            trace!(dependency = name, "explicit override");
            return match entry {
                Override::Artifact(artifact) => Ok(Some(LoadedArtifact::new(
                    artifact.clone(),
                    Locator::new(format!("override:{name}")),
                    Origin::Explicit,
                ))),
                Override::Locator(locator) => loader.fetch(locator).await,
            };
        }

        if let Some(locator) = descriptor.locator()
            && let Some(loaded) = loader.fetch(locator).await?
        {
            return Ok(Some(loaded));
        }

        let search_paths = self.inner.search_paths.load_full();
        loader.load(name, &search_paths).await
    }

    async fn produce(
        &self,
        descriptor: Descriptor,
        producer: Arc<Callable>,
        parent: Lineage,
    ) -> ProducerOutcome {
        let name = descriptor.name();
        let registry = &self.inner.registry;
        let _pass = registry.gates().enter(name, &parent).await?;

        if let Some(value) = registry.cached(name) {
            trace!(dependency = name, "produced while waiting at the gate");
            return Ok(Some(value));
        }

        debug!(dependency = name, producer = producer.name(), "producing");
        let produced = self.resolve(producer, parent.push(name)).await?;
        match &produced {
            Some(value) => registry.cache(&descriptor, value.clone()),
            None => debug!(dependency = name, "producer returned nothing, not cached"),
        }
        Ok(produced)
    }
}

/// Run a callable's body with its resolved inputs
async fn invoke(target: &Callable, arguments: Arguments) -> ProducerOutcome {
    trace!(target = target.name(), body = target.body().kind(), "invoking");
    match target.body() {
        Body::Returning(body) => body(arguments),
        Body::Future(body) => body(arguments).await,
        Body::Deferred(body) => {
            let (continuation, completed) = Continuation::channel(target.name());
            body(arguments, continuation);
            completed.await.map_err(|_| Error::ContinuationDropped {
                name: target.name().to_string(),
            })?
        }
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("loader", &self.inner.loader.loader_name())
            .field("search_paths", &self.search_paths())
            .field("policy", &self.inner.policy)
            .field("registry", &self.inner.registry)
            .finish()
    }
}

/// Builder for [`Injector`]
pub struct InjectorBuilder {
    loader: SharedArtifactLoader,
    options: InjectorOptions,
}

impl InjectorBuilder {
    /// Append a search path
    pub fn search_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.search_paths.push(path.into());
        self
    }

    /// Append several search paths
    pub fn search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.options
            .search_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the auto-injection policy
    pub fn policy(mut self, policy: InjectPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    /// Invoke producers found under the search paths
    pub fn auto_inject_local_factories(mut self, enabled: bool) -> Self {
        self.options.policy.auto_inject_local_factories = enabled;
        self
    }

    /// Invoke producers found through the global package lookup
    pub fn auto_inject_external_factories(mut self, enabled: bool) -> Self {
        self.options.policy.auto_inject_external_factories = enabled;
        self
    }

    /// Resolve `name` to `artifact` without searching
    pub fn override_artifact<S: Into<String>, A: Into<Artifact>>(
        mut self,
        name: S,
        artifact: A,
    ) -> Self {
        self.options
            .overrides
            .insert(name.into(), Override::Artifact(artifact.into()));
        self
    }

    /// Resolve `name` through `locator` instead of searching
    pub fn override_locator<S: Into<String>, L: Into<Locator>>(mut self, name: S, locator: L) -> Self {
        self.options
            .overrides
            .insert(name.into(), Override::Locator(locator.into()));
        self
    }

    /// Replace every option at once
    pub fn options(mut self, options: InjectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the injector
    pub fn build(self) -> Result<Injector> {
        Injector::new(self.loader, self.options)
    }
}

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Value returned by a handler, type-erased for transport through the chain.
///
/// Handlers returning `()`, and invokers that defer work (outbox), produce an
/// empty response.
#[derive(Clone, Default)]
pub struct Response {
    value: Option<Arc<dyn Any + Send + Sync>>,
    type_name: Option<&'static str>,
}

impl Response {
    /// Wrap a handler's return value. `()` becomes an empty response and a
    /// `Response` is passed through unchanged.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
        match boxed.downcast::<Response>() {
            Ok(response) => *response,
            Err(_) if TypeId::of::<T>() == TypeId::of::<()>() => Self::empty(),
            Err(value) => Self {
                value: Some(Arc::from(value)),
                type_name: Some(std::any::type_name::<T>()),
            },
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    /// Clone the value out as `T`.
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name {
            Some(name) => write!(f, "Response({})", name),
            None => f.write_str("Response(empty)"),
        }
    }
}

impl From<()> for Response {
    fn from(_: ()) -> Self {
        Response::empty()
    }
}

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`
/// and are also logged through `tracing` at debug level.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use precedence_registry::RegistryEvent;
///
/// let event = RegistryEvent::Resolve { key: "IFoo", found: true };
/// assert_eq!(event.to_string(), "resolve { key: IFoo, found: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A provider was installed unconditionally.
    Set {
        key: &'static str,
        tag: String,
        /// Whether an existing provider was replaced
        replaced: bool,
    },

    /// A conditional registration was attempted.
    SetIfAbsent {
        key: &'static str,
        tag: String,
        /// `false` when an existing entry won and the call was a no-op
        installed: bool,
    },

    /// A service was requested from the registry.
    Resolve { key: &'static str, found: bool },

    /// A key existence check was performed.
    Contains { key: &'static str, found: bool },

    /// A single entry was removed.
    Remove { key: &'static str, found: bool },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Set { key, tag, replaced } => {
                write!(f, "set {{ key: {key}, tag: {tag}, replaced: {replaced} }}")
            }
            RegistryEvent::SetIfAbsent {
                key,
                tag,
                installed,
            } => write!(
                f,
                "set_if_absent {{ key: {key}, tag: {tag}, installed: {installed} }}"
            ),
            RegistryEvent::Resolve { key, found } => {
                write!(f, "resolve {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Contains { key, found } => {
                write!(f, "contains {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Remove { key, found } => {
                write!(f, "remove {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}

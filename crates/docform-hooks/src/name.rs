//! Hook point names

use std::fmt;

/// A named lifecycle interception point
///
/// The lifecycle points are a closed set; field-level triggers carry the
/// fieldname they watch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookName {
    Validate,
    BeforeSave,
    AfterSave,
    BeforeSubmit,
    OnSubmit,
    BeforeCancel,
    AfterCancel,
    BeforeLoad,
    Onload,
    OnloadPostRender,
    Refresh,
    /// Fires when the named field changes
    Field(String),
}

impl HookName {
    /// Field trigger for `fieldname`
    #[inline]
    #[must_use]
    pub fn field(fieldname: impl Into<String>) -> Self {
        HookName::Field(fieldname.into())
    }

    /// Whether this hook runs before the remote call of its action
    ///
    /// Pre-hooks are the ones whose veto must abort the action.
    #[must_use]
    pub fn is_pre_hook(&self) -> bool {
        matches!(
            self,
            HookName::Validate
                | HookName::BeforeSave
                | HookName::BeforeSubmit
                | HookName::BeforeCancel
                | HookName::BeforeLoad
        )
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookName::Validate => write!(f, "validate"),
            HookName::BeforeSave => write!(f, "before_save"),
            HookName::AfterSave => write!(f, "after_save"),
            HookName::BeforeSubmit => write!(f, "before_submit"),
            HookName::OnSubmit => write!(f, "on_submit"),
            HookName::BeforeCancel => write!(f, "before_cancel"),
            HookName::AfterCancel => write!(f, "after_cancel"),
            HookName::BeforeLoad => write!(f, "before_load"),
            HookName::Onload => write!(f, "onload"),
            HookName::OnloadPostRender => write!(f, "onload_post_render"),
            HookName::Refresh => write!(f, "refresh"),
            HookName::Field(name) => write!(f, "{name}"),
        }
    }
}

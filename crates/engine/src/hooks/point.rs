//! Lifecycle point enumeration

use std::fmt;

/// A fixed named moment in the build pipeline where a hook may run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// After config resolution, before any template is read (once per build)
    BeforeCreate,
    /// Immediately before a template is compiled (once per template)
    BeforeRender,
    /// After compilation, before the transformer chain (once per template)
    AfterRender,
    /// After the transformer chain, before disk write (once per template)
    AfterTransformers,
    /// After all files are written (once per build; terminal notification)
    AfterBuild,
}

impl HookPoint {
    /// All points, in pipeline order
    pub const ALL: [HookPoint; 5] = [
        HookPoint::BeforeCreate,
        HookPoint::BeforeRender,
        HookPoint::AfterRender,
        HookPoint::AfterTransformers,
        HookPoint::AfterBuild,
    ];

    /// Canonical name of this point
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HookPoint::BeforeCreate => "beforeCreate",
            HookPoint::BeforeRender => "beforeRender",
            HookPoint::AfterRender => "afterRender",
            HookPoint::AfterTransformers => "afterTransformers",
            HookPoint::AfterBuild => "afterBuild",
        }
    }

    /// Resolve a point from its canonical name
    ///
    /// Returns `None` for unrecognized names so that registration surfaces
    /// can ignore them (forward compatibility with future points).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "beforeCreate" => Some(HookPoint::BeforeCreate),
            "beforeRender" => Some(HookPoint::BeforeRender),
            "afterRender" => Some(HookPoint::AfterRender),
            "afterTransformers" => Some(HookPoint::AfterTransformers),
            "afterBuild" => Some(HookPoint::AfterBuild),
            _ => None,
        }
    }

    /// True for the three per-template points that carry an HTML payload
    #[must_use]
    pub fn is_render_scoped(self) -> bool {
        matches!(
            self,
            HookPoint::BeforeRender | HookPoint::AfterRender | HookPoint::AfterTransformers
        )
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

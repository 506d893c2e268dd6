//! # Enchant Levels
//!
//! The effective Fortune / Looting level of a tool is the highest level any
//! source reports:
//!
//! ```text
//! vanilla enchant ──┐
//! custom "Fortune" ─┤
//! custom "Luck"    ─┼──> max ──> effective level
//! custom "fortune" ─┤
//! custom "luck"    ─┘
//! ```
//!
//! Custom enchant plugins are optional. Whether one is present is decided
//! once, at startup, by [`CustomEnchants::probe`]; nothing is re-detected
//! afterwards.

/// Enchantments the host reports natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VanillaEnchant {
    /// Block drop bonus.
    Fortune,
    /// Mob drop bonus.
    Looting,
    /// Drop the block itself.
    SilkTouch,
}

/// A held tool as the host sees it.
pub trait EnchantedTool {
    /// Whether the tool carries any item metadata. A tool without metadata
    /// has no enchantments from any source.
    fn has_meta(&self) -> bool;

    /// Native level of `enchant`, `0` when absent.
    fn vanilla_level(&self, enchant: VanillaEnchant) -> u32;
}

/// A custom enchant plugin's lookup.
pub trait CustomEnchantApi<T: ?Sized> {
    /// Level of the custom enchant called `name` on `tool`, `0` when absent
    /// or when the lookup fails.
    fn level(&self, tool: &T, name: &str) -> u32;
}

/// API type for hosts that never have a custom enchant plugin.
#[derive(Clone, Copy, Debug)]
pub enum NoCustomEnchants {}

impl<T: ?Sized> CustomEnchantApi<T> for NoCustomEnchants {
    fn level(&self, _tool: &T, _name: &str) -> u32 {
        match *self {}
    }
}

/// Custom enchant names counted as Fortune.
pub const FORTUNE_NAMES: [&str; 4] = ["Fortune", "Luck", "fortune", "luck"];
/// Custom enchant names counted as Looting.
pub const LOOTING_NAMES: [&str; 3] = ["Looting", "looting", "LOOTING"];
/// Custom enchant name for Silk Touch.
pub const SILK_TOUCH_NAME: &str = "Silk Touch";

/// Outcome of the startup probe for a custom enchant plugin.
#[derive(Clone, Debug, Default)]
pub enum CustomEnchants<A> {
    /// The plugin answered; its levels are merged in.
    Available(A),
    /// Vanilla enchants only.
    #[default]
    Unavailable,
}

impl<A> CustomEnchants<A> {
    /// Turns an optional API handle into a capability.
    pub fn probe(api: Option<A>) -> Self {
        match api {
            Some(api) => {
                tracing::info!(target: "oredrops", "custom enchant plugin detected, custom enchants enabled");
                Self::Available(api)
            }
            None => {
                tracing::info!(target: "oredrops", "no custom enchant plugin, using vanilla enchants only");
                Self::Unavailable
            }
        }
    }

    /// Whether custom levels are consulted.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Highest custom level among `names`; `0` when unavailable.
    pub fn max_level<T: ?Sized>(&self, tool: &T, names: &[&str]) -> u32
    where
        A: CustomEnchantApi<T>,
    {
        match self {
            Self::Available(api) => names.iter().map(|name| api.level(tool, name)).max().unwrap_or(0),
            Self::Unavailable => 0,
        }
    }
}

/// Fortune level of `tool`.
pub fn fortune_level<T, A>(tool: &T, custom: &CustomEnchants<A>) -> u32
where
    T: EnchantedTool + ?Sized,
    A: CustomEnchantApi<T>,
{
    combined_level(tool, custom, VanillaEnchant::Fortune, &FORTUNE_NAMES)
}

/// Looting level of `tool`.
pub fn looting_level<T, A>(tool: &T, custom: &CustomEnchants<A>) -> u32
where
    T: EnchantedTool + ?Sized,
    A: CustomEnchantApi<T>,
{
    combined_level(tool, custom, VanillaEnchant::Looting, &LOOTING_NAMES)
}

/// Whether `tool` has Silk Touch from any source. Silk touch breaks grant
/// no configured drops.
pub fn has_silk_touch<T, A>(tool: &T, custom: &CustomEnchants<A>) -> bool
where
    T: EnchantedTool + ?Sized,
    A: CustomEnchantApi<T>,
{
    tool.has_meta()
        && (tool.vanilla_level(VanillaEnchant::SilkTouch) > 0
            || custom.max_level(tool, &[SILK_TOUCH_NAME]) > 0)
}

fn combined_level<T, A>(tool: &T, custom: &CustomEnchants<A>, vanilla: VanillaEnchant, names: &[&str]) -> u32
where
    T: EnchantedTool + ?Sized,
    A: CustomEnchantApi<T>,
{
    if !tool.has_meta() {
        return 0;
    }
    tool.vanilla_level(vanilla).max(custom.max_level(tool, names))
}

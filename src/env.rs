use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// UA token tables are the legacy fallback; classification prefers the
// capability facts captured in the snapshot.
const PHONE_TOKENS: &[&str] = &[
    "iphone",
    "ipod",
    "android",
    "blackberry",
    "palm",
    "webos",
    "windows phone os",
    "iemobile",
];
const PHONE_TOKEN_PAIRS: &[(&str, &str)] = &[("series60", "webkit"), ("symbian", "webkit")];

const TOUCH_TOKENS: &[&str] = &[
    "ipad",
    "iphone",
    "ipod",
    "android",
    "webos",
    "windows phone os",
];
const TOUCH_TOKEN_PAIRS: &[(&str, &str)] = &[
    ("series60", "webkit"),
    ("symbian", "webkit"),
    ("blackberry", "webkit"),
    ("playbook", "webkit"),
];

const IE_APP_NAME: &str = "Microsoft Internet Explorer";

#[wasm_bindgen(inline_js = r#"
export function ua_data_mobile() {
  // The modern userAgentData API is authoritative where available
  if (navigator.userAgentData && typeof navigator.userAgentData.mobile !== 'undefined') {
    return navigator.userAgentData.mobile;
  }
  return undefined;
}
export function has_touch_events() {
  return 'ontouchstart' in window;
}
"#)]
extern "C" {
    fn ua_data_mobile() -> JsValue;
    fn has_touch_events() -> bool;
}

/// A snapshot of the browser environment facts classification runs against.
///
/// Captured once (`detect`) or injected synthetically (`from_user_agent`);
/// never mutated afterwards. Classifiers are total functions of the snapshot,
/// so they never re-probe the browser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Environment {
    pub user_agent: String,
    pub app_name: String,
    /// `navigator.userAgentData.mobile` where the browser exposes it.
    pub ua_data_mobile: Option<bool>,
    /// Whether touch events are wired up on the window.
    pub touch_events: bool,
    pub max_touch_points: i32,
}

impl Environment {
    /// Probes the live browser once. Only meaningful on wasm32 in a window
    /// context.
    pub fn detect() -> Self {
        let navigator = web_sys::window().map(|w| w.navigator());
        let user_agent = navigator
            .as_ref()
            .and_then(|n| n.user_agent().ok())
            .unwrap_or_default();
        let max_touch_points = navigator.as_ref().map(|n| n.max_touch_points()).unwrap_or(0);
        let app_name = navigator
            .as_ref()
            .map(|n| n.app_name())
            .unwrap_or_default();

        Self {
            user_agent,
            app_name,
            ua_data_mobile: ua_data_mobile().as_bool(),
            touch_events: has_touch_events(),
            max_touch_points,
        }
    }

    /// Synthetic snapshot with only a user-agent string; capability facts
    /// default to absent. Useful in tests and for callers classifying a UA
    /// they received elsewhere.
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Whether this environment is a phone-class device.
    pub fn is_phone(&self) -> bool {
        if let Some(mobile) = self.ua_data_mobile {
            return mobile;
        }
        matches_tokens(&self.user_agent, PHONE_TOKENS, PHONE_TOKEN_PAIRS)
    }

    /// Whether this environment has a touch-driven pointer.
    pub fn is_touch(&self) -> bool {
        if self.touch_events || self.max_touch_points > 0 {
            return true;
        }
        matches_tokens(&self.user_agent, TOUCH_TOKENS, TOUCH_TOKEN_PAIRS)
    }

    pub fn is_ie(&self) -> bool {
        self.app_name == IE_APP_NAME
    }

    pub fn is_android(&self) -> bool {
        self.user_agent.to_lowercase().contains("android")
    }

    pub fn is_mobile_safari(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        ua.contains("mobile") && ua.contains("safari")
    }
}

fn matches_tokens(user_agent: &str, tokens: &[&str], pairs: &[(&str, &str)]) -> bool {
    let ua = user_agent.to_lowercase();
    tokens.iter().any(|token| ua.contains(token))
        || pairs.iter().any(|(a, b)| ua.contains(a) && ua.contains(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1";
    const DESKTOP_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0";

    #[test]
    fn iphone_is_phone_and_touch() {
        let env = Environment::from_user_agent(IPHONE_UA);
        assert!(env.is_phone());
        assert!(env.is_touch());
    }

    #[test]
    fn unrecognized_ua_is_neither() {
        let env = Environment::from_user_agent(DESKTOP_UA);
        assert!(!env.is_phone());
        assert!(!env.is_touch());
    }

    #[test]
    fn ipad_is_touch_but_not_phone() {
        let env = Environment::from_user_agent(
            "Mozilla/5.0 (iPad; CPU OS 15_0 like Mac OS X) AppleWebKit/605.1.15",
        );
        assert!(env.is_touch());
        assert!(!env.is_phone());
    }

    #[test]
    fn android_matches_case_insensitively() {
        let env = Environment::from_user_agent("Mozilla/5.0 (Linux; Android 13; Pixel 7)");
        assert!(env.is_android());
        assert!(env.is_phone());
        assert!(env.is_touch());
    }

    #[test]
    fn symbian_needs_webkit_companion_token() {
        let bare = Environment::from_user_agent("Mozilla/5.0 (SymbianOS/9.4; U)");
        assert!(!bare.is_phone());

        let with_webkit =
            Environment::from_user_agent("Mozilla/5.0 (SymbianOS/9.4; U) AppleWebKit/525");
        assert!(with_webkit.is_phone());
        assert!(with_webkit.is_touch());
    }

    #[test]
    fn ua_data_verdict_overrides_token_table() {
        let mut env = Environment::from_user_agent(DESKTOP_UA);
        env.ua_data_mobile = Some(true);
        assert!(env.is_phone());

        let mut env = Environment::from_user_agent(IPHONE_UA);
        env.ua_data_mobile = Some(false);
        assert!(!env.is_phone());
    }

    #[test]
    fn touch_capability_short_circuits_ua_match() {
        let mut env = Environment::from_user_agent(DESKTOP_UA);
        env.max_touch_points = 5;
        assert!(env.is_touch());

        let mut env = Environment::from_user_agent(DESKTOP_UA);
        env.touch_events = true;
        assert!(env.is_touch());
    }

    #[test]
    fn ie_is_classified_by_app_name() {
        let mut env = Environment::from_user_agent("Mozilla/4.0 (compatible; MSIE 8.0)");
        assert!(!env.is_ie());
        env.app_name = "Microsoft Internet Explorer".to_string();
        assert!(env.is_ie());
    }

    #[test]
    fn mobile_safari_requires_both_tokens() {
        assert!(Environment::from_user_agent(IPHONE_UA).is_mobile_safari());
        // Desktop Safari carries "safari" but not "mobile"; the negative
        // branch is an explicit false.
        let desktop_safari = Environment::from_user_agent(
            "Mozilla/5.0 (Macintosh) AppleWebKit/605.1.15 Version/15.0 Safari/605.1.15",
        );
        assert!(!desktop_safari.is_mobile_safari());
    }
}

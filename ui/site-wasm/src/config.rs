//! Page constants: element ids, storage keys and timings.

// ── Log panel ──
pub const LOG_BUTTON: &str = "log-button";
pub const LOG_PANEL: &str = "log-panel";
pub const LOG_CLOSE: &str = "close-log";
pub const LOG_ADD: &str = "add-log";
pub const LOG_INPUT: &str = "log-input";
pub const LOG_LIST: &str = "log-list";

// ── Message board ──
pub const MESSAGE_TOGGLE: &str = "add-message-btn";
pub const MESSAGE_SUBMIT: &str = "submit-message";
pub const MESSAGE_INPUT: &str = "message-input";
pub const MESSAGE_LIST: &str = "messages-container";
pub const MESSAGE_INPUT_AREA: &str = ".message-input-area";

// ── Icon grid ──
pub const ICON_ADD_BUTTON: &str = "floating-add-btn";
pub const ICON_MODAL: &str = "add-icon-modal";
pub const ICON_MODAL_CLOSE: &str = "close-modal";
pub const ICON_MODAL_CANCEL: &str = "cancel-add";
pub const ICON_MODAL_CONFIRM: &str = "confirm-add";
pub const ICON_NAME_INPUT: &str = "icon-name";
pub const ICON_URL_INPUT: &str = "icon-url";
pub const ICON_IMAGE_INPUT: &str = "icon-image";
pub const ICON_LIST: &str = "user-icons-container";
pub const ICON_GRID: &str = ".button-container";
pub const ICON_FALLBACK_IMAGE: &str = "https://p1.ssl.qhmsg.com/dr/270_500_/t017fef093f1d96da34.jpg";
/// Built-in shortcuts rendered by the page itself, ahead of user icons.
pub const FIXED_ICON_COUNT: usize = 5;
pub const ICONS_PER_ROW: usize = 6;

// ── Dark mode ──
pub const DARK_MODE_KEY: &str = "darkMode";
pub const DARK_MODE_TOGGLE: &str = "dark-mode-toggle";
pub const DARK_MODE_BUTTON: &str = "dark-mode-button";
pub const DARK_MODE_ICON: &str = ".dark-mode-icon";
pub const LIGHT_BACKGROUND: &str = "Yuki.avif";
pub const DARK_BACKGROUND: &str = "d-Yuki.jpg";

// ── Timings (ms) ──
pub const TOAST_MS: u32 = 2_000;
pub const PANEL_ANIMATION_MS: u32 = 400;
pub const MODAL_RELEASE_MS: u32 = 300;
pub const FOCUS_DELAY_MS: u32 = 100;
pub const RIPPLE_MS: u32 = 500;
/// Quiet period after which the icon grid counts as no longer scrolling.
pub const SCROLL_SETTLE_MS: u32 = 150;

// ── Scroll controls ──
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;
/// Wrapper that receives the message board's scroll buttons.
pub const MESSAGE_BOARD: &str = ".message-board";

pub const TIME_LOCALE: &str = "zh-CN";

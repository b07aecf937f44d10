//! Decisions for the copy deterrents. These only advise the page; nothing
//! here restricts access to the underlying images.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    RightClick,
    Saving,
    Printing,
    DevTools,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::RightClick => "Right-click is disabled",
            Notice::Saving => "Saving is disabled",
            Notice::Printing => "Printing is disabled",
            Notice::DevTools => "Developer tools are disabled",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl<'a> KeyInput<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Shortcut that gets cancelled, with the notice to show for it.
pub fn blocked_shortcut(input: &KeyInput<'_>) -> Option<Notice> {
    let key = input.key;
    if input.command() && key.eq_ignore_ascii_case("s") {
        return Some(Notice::Saving);
    }
    if key == "PrintScreen" || (input.command() && key.eq_ignore_ascii_case("p")) {
        return Some(Notice::Printing);
    }
    if key == "F12" || (input.ctrl && input.shift && key.eq_ignore_ascii_case("i")) {
        return Some(Notice::DevTools);
    }
    None
}

pub fn blocks_context_menu(viewer_open: bool, target_protected: bool) -> bool {
    viewer_open || target_protected
}

pub fn blocks_drag(target_protected: bool) -> bool {
    target_protected
}

pub fn blocks_selection(viewer_open: bool, target_protected: bool) -> bool {
    viewer_open || target_protected
}

pub fn blocks_touch(viewer_open: bool) -> bool {
    viewer_open
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerKey {
    Previous,
    Next,
    Close,
}

pub fn viewer_key(key: &str) -> Option<ViewerKey> {
    match key {
        "ArrowLeft" => Some(ViewerKey::Previous),
        "ArrowRight" | " " => Some(ViewerKey::Next),
        "Escape" => Some(ViewerKey::Close),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(key: &str) -> KeyInput<'_> {
        KeyInput {
            key,
            ctrl: true,
            ..KeyInput::default()
        }
    }

    #[test]
    fn save_and_print_shortcuts_are_blocked() {
        assert_eq!(blocked_shortcut(&ctrl("s")), Some(Notice::Saving));
        let cmd_p = KeyInput {
            key: "p",
            meta: true,
            ..KeyInput::default()
        };
        assert_eq!(blocked_shortcut(&cmd_p), Some(Notice::Printing));
        assert_eq!(
            blocked_shortcut(&KeyInput::plain("PrintScreen")),
            Some(Notice::Printing)
        );
    }

    #[test]
    fn devtools_shortcuts_are_blocked() {
        assert_eq!(blocked_shortcut(&KeyInput::plain("F12")), Some(Notice::DevTools));
        let inspect = KeyInput {
            key: "I",
            ctrl: true,
            shift: true,
            ..KeyInput::default()
        };
        assert_eq!(blocked_shortcut(&inspect), Some(Notice::DevTools));
    }

    #[test]
    fn ordinary_keys_pass_through() {
        assert_eq!(blocked_shortcut(&KeyInput::plain("s")), None);
        assert_eq!(blocked_shortcut(&ctrl("c")), None);
        assert_eq!(blocked_shortcut(&ctrl("I")), None);
        assert_eq!(blocked_shortcut(&KeyInput::plain("ArrowLeft")), None);
    }

    #[test]
    fn pointer_gestures_depend_on_viewer_and_target() {
        assert!(blocks_context_menu(true, false));
        assert!(blocks_context_menu(false, true));
        assert!(!blocks_context_menu(false, false));
        assert!(!blocks_drag(false));
        assert!(blocks_selection(true, false));
        assert!(!blocks_touch(false));
    }

    #[test]
    fn viewer_keys_map_to_actions() {
        assert_eq!(viewer_key("ArrowLeft"), Some(ViewerKey::Previous));
        assert_eq!(viewer_key(" "), Some(ViewerKey::Next));
        assert_eq!(viewer_key("Escape"), Some(ViewerKey::Close));
        assert_eq!(viewer_key("Enter"), None);
    }
}

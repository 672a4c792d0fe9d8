//! Scroll-to-top/bottom buttons for the long lists.
//!
//! Each button is only visible while there is more than
//! `config::SCROLL_THRESHOLD_PX` of content past that edge.

use crate::config;
use crate::dom;
use wasm_bindgen::prelude::*;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub top: f64,
    pub height: f64,
    pub client: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub above: bool,
    pub below: bool,
}

pub fn overflow(metrics: ScrollMetrics, threshold: f64) -> Overflow {
    Overflow {
        above: metrics.top > threshold,
        below: metrics.top + metrics.client < metrics.height - threshold,
    }
}

/// A scrolling list and its two buttons.
#[derive(Clone)]
pub struct ScrollControls {
    list: Element,
    to_top: Element,
    to_bottom: Element,
    /// Also mark the list itself with `scrollable-top`/`scrollable-bottom`.
    mark_list: bool,
}

impl ScrollControls {
    /// Creates the buttons, appends them to `host` and wires their clicks.
    /// The buttons get the classes `scroll-to-top<suffix>` and
    /// `scroll-to-bottom<suffix>`.
    pub fn install(
        list: &Element,
        host: &Element,
        suffix: &str,
        mark_list: bool,
    ) -> Result<ScrollControls, JsValue> {
        let to_top = scroll_button(&format!("scroll-to-top{suffix}"), "↑", "滚动到顶部")?;
        let to_bottom = scroll_button(&format!("scroll-to-bottom{suffix}"), "↓", "滚动到底部")?;
        host.append_child(&to_top)?;
        host.append_child(&to_bottom)?;

        let controls = ScrollControls {
            list: list.clone(),
            to_top,
            to_bottom,
            mark_list,
        };
        {
            let c = controls.clone();
            crate::events::listen(&controls.to_top, "click", move |_| c.scroll_to_top())?;
        }
        {
            let c = controls.clone();
            crate::events::listen(&controls.to_bottom, "click", move |_| c.scroll_to_bottom())?;
        }
        {
            let c = controls.clone();
            crate::events::listen(&controls.list, "scroll", move |_| c.refresh())?;
        }
        Ok(controls)
    }

    pub fn refresh(&self) {
        let state = overflow(
            ScrollMetrics {
                top: f64::from(self.list.scroll_top()),
                height: f64::from(self.list.scroll_height()),
                client: f64::from(self.list.client_height()),
            },
            config::SCROLL_THRESHOLD_PX,
        );
        set_flag(&self.to_top, "visible", state.above);
        set_flag(&self.to_bottom, "visible", state.below);
        if self.mark_list {
            set_flag(&self.list, "scrollable-top", state.above);
            set_flag(&self.list, "scrollable-bottom", state.below);
        }
    }

    pub fn scroll_to_top(&self) {
        self.smooth_scroll(0.0);
    }

    pub fn scroll_to_bottom(&self) {
        self.smooth_scroll(f64::from(self.list.scroll_height()));
    }

    fn smooth_scroll(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.list.scroll_to_with_scroll_to_options(&options);
    }
}

fn scroll_button(class: &str, label: &str, title: &str) -> Result<Element, JsValue> {
    let button = dom::create_element("button")?;
    button.set_class_name(class);
    button.set_attribute("title", title)?;
    dom::set_text(&button, label);
    Ok(button)
}

fn set_flag(el: &Element, class: &str, on: bool) {
    if on {
        dom::add_class(el, class);
    } else {
        dom::remove_class(el, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(top: f64) -> ScrollMetrics {
        ScrollMetrics {
            top,
            height: 1000.0,
            client: 300.0,
        }
    }

    #[test]
    fn short_lists_show_no_buttons() {
        let fits = ScrollMetrics {
            top: 0.0,
            height: 300.0,
            client: 300.0,
        };
        assert_eq!(overflow(fits, 50.0), Overflow { above: false, below: false });
    }

    #[test]
    fn buttons_follow_the_scroll_position() {
        assert_eq!(overflow(at(0.0), 50.0), Overflow { above: false, below: true });
        assert_eq!(overflow(at(400.0), 50.0), Overflow { above: true, below: true });
        assert_eq!(overflow(at(700.0), 50.0), Overflow { above: true, below: false });
    }

    #[test]
    fn threshold_edges_are_exclusive() {
        assert!(!overflow(at(50.0), 50.0).above);
        assert!(overflow(at(51.0), 50.0).above);
        assert!(!overflow(at(650.0), 50.0).below);
        assert!(overflow(at(649.0), 50.0).below);
    }
}

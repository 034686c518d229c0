//! Filter State
//!
//! Mirrors the return page's marathon and station filters into the URL
//! query string. The URL is the only place filter state lives, so every
//! change ends in a navigation.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::widgets::{SelectWidget, WidgetBoard, WidgetId};

pub const MARATHON_PARAM: &str = "marathon";
pub const STATION_PARAM: &str = "station";

/// `application/x-www-form-urlencoded` keeps these bytes; space becomes `+`
const FORM_ENCODE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_').remove(b' ');

/// Ordered query parameters, duplicates allowed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses `location.search`, with or without the leading `?`
    pub fn parse(search: &str) -> Self {
        let pairs = search
            .trim_start_matches('?')
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { pairs }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Replaces the first `key` in place and drops any others; appends when absent
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value.to_string();
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode(key), encode(value))?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " ")).decode_utf8_lossy().into_owned()
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_ENCODE).to_string().replace(' ', "+")
}

/// Where filter changes read the current query from and navigate to
pub trait Navigator {
    fn search(&self) -> String;
    fn navigate(&self, search: &str);
}

/// `window.location`, assigning `search` reloads the page
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, search: &str) {
        web_sys::console::log_1(&format!("[FILTER] Navigating to ?{}", search).into());
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_search(search) {
                web_sys::console::error_1(&format!("[FILTER] Navigation failed: {:?}", e).into());
            }
        }
    }
}

/// Owner of the filter change handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterController<N> {
    navigator: N,
}

impl<N: Navigator> FilterController<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    #[cfg(test)]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Marathon filter changed: mirror it and drop any station, which only
    /// made sense for the previous marathon. No-op without the widget.
    pub fn on_marathon_change(&self, board: &WidgetBoard) -> bool {
        let Some(marathon) = board.get(WidgetId::MarathonFilter) else {
            return false;
        };
        let mut params = QueryParams::parse(&self.navigator.search());
        mirror_marathon(&mut params, marathon);
        params.delete(STATION_PARAM);
        self.navigator.navigate(&params.to_string());
        true
    }

    /// Station filter changed: mirror both filters, keeping the marathon.
    /// No-op unless both widgets are present.
    pub fn on_station_change(&self, board: &WidgetBoard) -> bool {
        let (Some(marathon), Some(station)) = (board.get(WidgetId::MarathonFilter), board.get(WidgetId::StationFilter)) else {
            return false;
        };
        let mut params = QueryParams::parse(&self.navigator.search());
        mirror_marathon(&mut params, marathon);
        match station.selected_option() {
            Some(option) if !option.is_placeholder() => params.set(STATION_PARAM, &option.value),
            _ => params.delete(STATION_PARAM),
        }
        self.navigator.navigate(&params.to_string());
        true
    }

    /// Routes a change signal to the handler registered for `widget`
    pub fn dispatch_change(&self, widget: WidgetId, board: &WidgetBoard) -> bool {
        match widget {
            WidgetId::MarathonFilter => self.on_marathon_change(board),
            WidgetId::StationFilter => self.on_station_change(board),
            _ => false,
        }
    }
}

fn mirror_marathon(params: &mut QueryParams, marathon: &SelectWidget) {
    if marathon.has_value() {
        params.set(MARATHON_PARAM, marathon.value());
    } else {
        params.delete(MARATHON_PARAM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LookupEntity;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        search: String,
        visited: RefCell<Vec<String>>,
    }

    impl RecordingNavigator {
        fn at(search: &str) -> Self {
            Self {
                search: search.to_string(),
                ..Default::default()
            }
        }

        fn last(&self) -> Option<QueryParams> {
            self.visited.borrow().last().map(|s| QueryParams::parse(s))
        }
    }

    impl Navigator for RecordingNavigator {
        fn search(&self) -> String {
            self.search.clone()
        }

        fn navigate(&self, search: &str) {
            self.visited.borrow_mut().push(search.to_string());
        }
    }

    fn entities(names: &[(u32, &str)]) -> Vec<LookupEntity> {
        names.iter().map(|(id, name)| LookupEntity { id: *id, name: name.to_string() }).collect()
    }

    fn board(marathon: Option<&str>, station: Option<&str>) -> WidgetBoard {
        let mut board = WidgetBoard::new();
        board.insert(
            SelectWidget::from_entities(WidgetId::MarathonFilter, "marathon", "-- Marathon --", &entities(&[(1, "City Run"), (2, "Night Trail")]))
                .with_value(marathon),
        );
        board.insert(
            SelectWidget::from_entities(WidgetId::StationFilter, "station", "-- Station --", &entities(&[(5, "Aid A"), (6, "Aid B")]))
                .with_value(station),
        );
        board
    }

    #[test]
    fn test_parse_and_display() {
        let params = QueryParams::parse("?marathon=3&note=a+b%26c&flag");
        assert_eq!(params.get("marathon"), Some("3"));
        assert_eq!(params.get("note"), Some("a b&c"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.to_string(), "marathon=3&note=a+b%26c&flag=");
    }

    #[test]
    fn test_set_replaces_first_and_drops_duplicates() {
        let mut params = QueryParams::parse("a=1&station=2&b=3&station=4");
        params.set("station", "9");
        assert_eq!(params.to_string(), "a=1&station=9&b=3");
        params.set("c", "x y");
        assert_eq!(params.to_string(), "a=1&station=9&b=3&c=x+y");
    }

    #[test]
    fn test_marathon_change_clears_station() {
        let controller = FilterController::new(RecordingNavigator::at("?marathon=1&station=5&page=2"));
        assert!(controller.on_marathon_change(&board(Some("2"), Some("5"))));

        let params = controller.navigator().last().unwrap();
        assert_eq!(params.get(MARATHON_PARAM), Some("2"));
        assert_eq!(params.get(STATION_PARAM), None);
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_marathon_cleared_removes_param() {
        let controller = FilterController::new(RecordingNavigator::at("?marathon=1"));
        controller.on_marathon_change(&board(None, None));
        assert_eq!(controller.navigator().visited.borrow().last().unwrap(), "");
    }

    #[test]
    fn test_station_change_keeps_marathon() {
        let controller = FilterController::new(RecordingNavigator::at("?marathon=1"));
        assert!(controller.on_station_change(&board(Some("1"), Some("6"))));

        let params = controller.navigator().last().unwrap();
        assert_eq!(params.get(MARATHON_PARAM), Some("1"));
        assert_eq!(params.get(STATION_PARAM), Some("6"));
    }

    #[test]
    fn test_station_placeholder_removes_param() {
        let controller = FilterController::new(RecordingNavigator::at("?marathon=1&station=6"));
        controller.on_station_change(&board(Some("1"), None));

        let params = controller.navigator().last().unwrap();
        assert_eq!(params.get(MARATHON_PARAM), Some("1"));
        assert_eq!(params.get(STATION_PARAM), None);
    }

    #[test]
    fn test_missing_widgets_are_noops() {
        let controller = FilterController::new(RecordingNavigator::at("?marathon=1"));
        let mut only_marathon = WidgetBoard::new();
        only_marathon.insert(SelectWidget::from_entities(WidgetId::MarathonFilter, "marathon", "", &[]));

        assert!(!controller.on_marathon_change(&WidgetBoard::new()));
        assert!(!controller.on_station_change(&only_marathon));
        assert!(controller.navigator().visited.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_routes_by_widget() {
        let controller = FilterController::new(RecordingNavigator::at(""));
        let board = board(Some("2"), Some("5"));

        assert!(controller.dispatch_change(WidgetId::MarathonFilter, &board));
        assert!(!controller.dispatch_change(WidgetId::PersonSelectReturn, &board));
        assert_eq!(controller.navigator().visited.borrow().len(), 1);
    }

    #[test]
    fn test_non_ascii_and_plus_survive_round_trip() {
        let params = QueryParams::parse("?name=Ch%E1%BA%A1y+5K%2B&marathon=1");
        assert_eq!(params.get("name"), Some("Chạy 5K+"));
        assert_eq!(params.to_string(), "name=Ch%E1%BA%A1y+5K%2B&marathon=1");

        // Raw UTF-8 in the address bar decodes the same way
        assert_eq!(QueryParams::parse("name=Chạy+5K%2B").get("name"), Some("Chạy 5K+"));
    }

    #[test]
    fn test_filter_change_keeps_non_ascii_params() {
        let controller = FilterController::new(RecordingNavigator::at("?name=Ch%E1%BA%A1y+5K%2B&marathon=1&station=5"));
        controller.on_marathon_change(&board(Some("2"), Some("5")));

        let visited = controller.navigator().visited.borrow().last().cloned().unwrap();
        assert_eq!(visited, "name=Ch%E1%BA%A1y+5K%2B&marathon=2");
    }
}

use tui_textarea::Input;

use super::BackendResponse;
use super::Message;

pub enum Event {
    BackendMessage(Message),
    BackendStreamUpdate(BackendResponse),
    ComparisonComplete(Message),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}

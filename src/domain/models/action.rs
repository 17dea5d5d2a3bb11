pub enum Action {
    ComparisonRequest(String),
}

/// UseCase metadata for identification and documentation
pub trait UseCaseMetadata {
    /// UseCase index (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "bulk_import")
    fn usecase_name() -> &'static str;

    /// Name shown in the UI
    fn display_name() -> &'static str;

    /// UseCase description
    fn description() -> &'static str {
        ""
    }

    /// Full name of the form "u501_bulk_import", also used as the tab key
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}

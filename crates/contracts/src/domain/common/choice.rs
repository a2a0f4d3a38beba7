/// Closed enumeration mirrored from a backend `choices` field.
///
/// `code` is the wire value, `label` what the UI prints.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.code() == code)
    }
}

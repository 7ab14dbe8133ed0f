/// Token persistence used by the API client
///
/// Implementations decide where tokens live (memory, a file on disk).
/// Writes that fail to persist are logged by the implementation and never
/// surface to the caller.
pub trait TokenStore {
    fn access_token(&self) -> Option<String>;

    fn set_access_token(&mut self, value: &str);

    fn remove_access_token(&mut self);

    fn refresh_token(&self) -> Option<String>;

    fn set_refresh_token(&mut self, value: &str);

    fn remove_refresh_token(&mut self);

    fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    fn has_refresh_token(&self) -> bool {
        self.refresh_token().is_some()
    }
}

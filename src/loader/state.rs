/// Observable state of a [`crate::loader::ListLoader`].
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderState<T> {
    /// Last successfully fetched list, `None` until a fetch succeeds.
    pub data: Option<Vec<T>>,
    pub loading: bool,
    /// Message of the last failed fetch; cleared when a new fetch starts.
    pub error: Option<String>,
}

impl<T> Default for LoaderState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> LoaderState<T> {
    pub fn status(&self) -> LoaderStatus {
        if self.loading {
            LoaderStatus::Loading
        } else if self.error.is_some() {
            LoaderStatus::Error
        } else {
            match &self.data {
                None => LoaderStatus::Idle,
                Some(items) if items.is_empty() => LoaderStatus::Empty,
                Some(_) => LoaderStatus::Success,
            }
        }
    }

    /// Whether a fetch succeeded with no items, as opposed to failing.
    pub fn is_empty_result(&self) -> bool {
        self.status() == LoaderStatus::Empty
    }
}

/// Coarse view of [`LoaderState`] for presentation code.
///
/// `Empty` and `Error` are distinct so a "no results" screen never hides a failed
/// request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoaderStatus {
    Idle,
    Loading,
    Empty,
    Success,
    Error,
}

impl LoaderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LoaderStatus::Idle => "idle",
            LoaderStatus::Loading => "loading",
            LoaderStatus::Empty => "empty",
            LoaderStatus::Success => "success",
            LoaderStatus::Error => "error",
        }
    }
}

/// Construction options of a [`crate::loader::ListLoader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderOptions<A> {
    /// Arguments of the automatic fetch issued at construction.
    pub initial_args: A,
    /// When `true` nothing is fetched until `refetch` is called. Defaults to `false`.
    pub skip_initial_fetch: bool,
}

impl<A> LoaderOptions<A> {
    pub fn new(initial_args: A) -> Self {
        Self {
            initial_args,
            skip_initial_fetch: false,
        }
    }

    pub fn skip_initial_fetch(mut self, skip: bool) -> Self {
        self.skip_initial_fetch = skip;
        self
    }
}

impl<A: Default> Default for LoaderOptions<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_distinguishes_empty_from_error() {
        let mut state = LoaderState::<u8>::default();
        assert_eq!(state.status(), LoaderStatus::Idle);

        state.data = Some(vec![]);
        assert_eq!(state.status(), LoaderStatus::Empty);
        assert!(state.is_empty_result());

        state.error = Some("network down".into());
        assert_eq!(state.status(), LoaderStatus::Error);
        assert!(!state.is_empty_result());

        state.loading = true;
        assert_eq!(state.status(), LoaderStatus::Loading);
    }

    #[test]
    fn options_fetch_on_construction_by_default() {
        let options = LoaderOptions::<u32>::default();
        assert!(!options.skip_initial_fetch);
        assert_eq!(options.initial_args, 0);
        assert!(LoaderOptions::new(3).skip_initial_fetch(true).skip_initial_fetch);
    }
}

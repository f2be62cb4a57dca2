#[cfg(test)]
use std::cell::RefCell;
#[cfg(not(test))]
use std::env;
use std::ops::Deref;

// region ArgName
/// Simple wrapper around a collection of strings.
/// Can be constructed automatically from &str & Vec<&str>.
/// Useful to handle args which can have multiple names
/// and those which can have no more than one name.
pub struct ArgName<'a> {
    names: Vec<&'a str>,
}
impl<'a> From<&'a str> for ArgName<'a> {
    fn from(val: &'a str) -> Self {
        ArgName { names: vec![val] }
    }
}

impl<'a> From<Vec<&'a str>> for ArgName<'a> {
    fn from(val: Vec<&'a str>) -> Self {
        ArgName { names: val }
    }
}

impl<'a> Deref for ArgName<'a> {
    type Target = Vec<&'a str>;

    fn deref(&self) -> &Self::Target {
        &self.names
    }
}
// endregion

/// Retrieve value associated to an arg passed to the app, as in `--arg-name=value`.
///
/// /!\ As this works on global variables,
/// a function using `retrieve_arg_value` could be tricky to test.
/// To do so, wrap your test with `with_env_args(args, fn)`.
/// This function is only available in a test context.
pub fn retrieve_arg_value<'a, A>(arg_names: A) -> Option<String>
where
    A: Into<ArgName<'a>>,
{
    let args: Vec<String> = get_env_args();
    let arg_names = arg_names.into();
    for arg in args {
        for arg_name in arg_names.iter() {
            let arg_prefix = format!("{arg_name}=");
            if arg.starts_with(&arg_prefix) {
                return arg.split_once("=").map(|(_, l)| l.to_owned());
            }
        }
    }

    None
}

/// Retrieve an arg value, or the given default if the arg has not been passed.
pub fn retrieve_arg_value_or<'a, A>(arg_names: A, default_value: &str) -> String
where
    A: Into<ArgName<'a>>,
{
    retrieve_arg_value(arg_names).unwrap_or_else(|| default_value.to_owned())
}

/// Whether a valueless flag (e.g. `--yes`) has been passed to the app.
pub fn is_flag_set<'a, A>(arg_names: A) -> bool
where
    A: Into<ArgName<'a>>,
{
    let arg_names = arg_names.into();
    get_env_args()
        .iter()
        .any(|arg| arg_names.iter().any(|arg_name| arg == arg_name))
}

#[cfg(not(test))]
fn get_env_args() -> Vec<String> {
    env::args().collect()
}

#[cfg(test)]
thread_local! {
    /// A mutable `Vec<String>` to host env args for tests.
    /// When a test is run with `with_env_args`,
    /// the inner `Vec` is set to whatever param is passed.
    /// It is then reset to its previous state.
    static ENV_ARGS: RefCell<Vec<String>> = const { RefCell::new(vec![]) };
}
#[cfg(test)]
fn get_env_args() -> Vec<String> {
    ENV_ARGS.with(|vec| vec.clone().into_inner())
}

#[cfg(test)]
/// When running tests, env args are extended from within the app.
/// You can set them up from there by wrapping your test with this function.
pub fn with_env_args<F, T>(args: Vec<String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    ENV_ARGS.with(|refcell| {
        let old_value = refcell.replace(args);
        let result = function();
        refcell.replace(old_value);
        result
    })
}

#[cfg(test)]
pub mod tests {
    use parameterized::{ide, parameterized};

    use crate::tools::env_args::{
        is_flag_set, retrieve_arg_value, retrieve_arg_value_or, with_env_args,
    };

    ide!();

    #[parameterized(
        args = {vec!["-c=config.json".to_owned()], vec!["--config=config.json".to_owned()], vec!["-r=data.csv".to_owned()], vec!["--recipients=data.csv".to_owned()], vec!["--another-arg=wrong".to_owned()]},
        arg_names = {vec!["-c", "--config"], vec!["-c", "--config"], vec!["-r", "--recipients"], vec!["-r", "--recipients"], vec!["-r", "--recipients"]},
        expected_result = {Some("config.json".to_owned()), Some("config.json".to_owned()), Some("data.csv".to_owned()), Some("data.csv".to_owned()), None}
    )]
    fn should_retrieve_arg_value(
        args: Vec<String>,
        arg_names: Vec<&str>,
        expected_result: Option<String>,
    ) {
        let result = with_env_args(args, || retrieve_arg_value(arg_names));
        assert_eq!(expected_result, result);
    }

    #[test]
    fn should_keep_everything_after_first_equal_sign() {
        let args = vec!["--output=out=put".to_owned()];

        let result = with_env_args(args, || retrieve_arg_value("--output"));

        assert_eq!(Some("out=put".to_owned()), result);
    }

    #[test]
    fn should_retrieve_default_arg_value() {
        let result = with_env_args(vec![], || retrieve_arg_value_or("--output", "output"));

        assert_eq!("output", result);
    }

    #[parameterized(
        args = {vec!["--yes".to_owned()], vec!["-y".to_owned()], vec!["--yes=no".to_owned()], vec![]},
        expected_result = {true, true, false, false}
    )]
    fn should_detect_flag(args: Vec<String>, expected_result: bool) {
        let result = with_env_args(args, || is_flag_set(vec!["-y", "--yes"]));
        assert_eq!(expected_result, result);
    }
}

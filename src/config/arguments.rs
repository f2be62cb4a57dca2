use std::path::PathBuf;

use derive_getters::Getters;

use crate::tools::env_args::{is_flag_set, retrieve_arg_value, retrieve_arg_value_or};

const CONFIG_ARG: [&str; 2] = ["-c", "--config"];
const RECIPIENTS_ARG: [&str; 2] = ["-r", "--recipients"];
const OUTPUT_ARG: [&str; 2] = ["-o", "--output"];
const ASSUME_YES_ARG: [&str; 2] = ["-y", "--yes"];
const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_RECIPIENTS_PATH: &str = "data.csv";

#[derive(Debug, PartialEq, Getters)]
pub struct RunArguments {
    config_path: PathBuf,
    recipients_path: PathBuf,
    /// Takes precedence over the output folder of the config file.
    output_dir: Option<PathBuf>,
    assume_yes: bool,
}

impl RunArguments {
    pub fn from_env_args() -> Self {
        Self {
            config_path: retrieve_arg_value_or(CONFIG_ARG.to_vec(), DEFAULT_CONFIG_PATH).into(),
            recipients_path: retrieve_arg_value_or(
                RECIPIENTS_ARG.to_vec(),
                DEFAULT_RECIPIENTS_PATH,
            )
            .into(),
            output_dir: retrieve_arg_value(OUTPUT_ARG.to_vec()).map(PathBuf::from),
            assume_yes: is_flag_set(ASSUME_YES_ARG.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::env_args::with_env_args;

    #[test]
    fn should_use_defaults() {
        let arguments = with_env_args(vec![], RunArguments::from_env_args);

        assert_eq!(
            RunArguments {
                config_path: PathBuf::from("config.json"),
                recipients_path: PathBuf::from("data.csv"),
                output_dir: None,
                assume_yes: false,
            },
            arguments
        );
    }

    #[test]
    fn should_read_arguments() {
        let args = vec![
            "certificate-mailer".to_owned(),
            "--config=event/config.json".to_owned(),
            "-r=event/attendees.csv".to_owned(),
            "--output=event/certificates".to_owned(),
            "-y".to_owned(),
        ];

        let arguments = with_env_args(args, RunArguments::from_env_args);

        assert_eq!(
            RunArguments {
                config_path: PathBuf::from("event/config.json"),
                recipients_path: PathBuf::from("event/attendees.csv"),
                output_dir: Some(PathBuf::from("event/certificates")),
                assume_yes: true,
            },
            arguments
        );
    }
}

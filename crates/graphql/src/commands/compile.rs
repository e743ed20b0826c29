use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_compiler::CompileReport;
use libgraphql_compiler::Config;
use libgraphql_compiler::Framework;
use libgraphql_compiler::FsWriter;
use libgraphql_compiler::compile;
use libgraphql_compiler::document::RawDocument;
use libgraphql_compiler::schema::SchemaBuilder;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct CompileCmd {
    #[arg(
        default_value="connection",
        help="Name of the directive that marks a field as a connection.",
        long,
    )]
    connection_directive: String,

    #[arg(
        default_value="name",
        help="Name of the connection directive's argument holding the \
             connection's name.",
        long,
    )]
    connection_name_arg: String,

    #[arg(
        default_value="kit",
        help="Framework the generated runtime adapter targets (`kit` or \
             `sapper`).",
        long,
    )]
    framework: Framework,

    #[arg(
        default_value="src/runtime",
        help="Directory the runtime adapter and the artifacts are written to.",
        long,
    )]
    out: PathBuf,

    #[arg(
        help="Suppress informational output from the compiler.",
        long,
        short='q',
    )]
    quiet: bool,

    #[arg(
        help="One or more GraphQL schema files.",
        long,
        required=true,
        value_delimiter = ',',
    )]
    schema: Vec<PathBuf>,

    #[arg(
        default_values_t=["svelte".to_string()],
        help="Set of file extensions to filter to when searching for source \
             files within a directory.",
        long,
        value_delimiter = ',',
    )]
    source_exts: Vec<String>,

    #[arg(
        help="Write rewritten source files back to disk.",
        long,
    )]
    write_sources: bool,

    #[arg(
        help="Paths to one or more source files or directories containing \
             source files to compile.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for CompileCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let mut errors: Vec<String> = vec![];

        let source_exts: HashSet<String> =
            self.source_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();
                        if !entry.file_type().is_file() {
                            log::trace!("Skipping non-file: {path:#?}.");
                            continue;
                        }
                        if let Some(ext) = path.extension().map(|s| s.to_string_lossy())
                            && source_exts.contains(&*ext) {
                            log::trace!("Found source file at {path:#?}.");
                            file_paths.push(path.to_path_buf());
                        }
                    },

                    Err(e) => {
                        log::trace!(
                            "Encountered an error while iterating recursive \
                            filesystem entities at/under {path:#?}."
                        );
                        errors.push(e.to_string());
                    },
                }
            }
        }

        // A single file passed explicitly is compiled regardless of its
        // extension.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            log::warn!(
                "Proceeding to compile {first_arg_path:#?} even though it \
                doesn't match any of the --source-exts ({}).",
                source_exts.iter()
                    .map(|ext| format!("`{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            file_paths.push(first_arg_path.to_owned());
        }

        log::debug!("Found {} source files to compile.", file_paths.len());

        let mut sources = vec![];
        for file_path in &file_paths {
            match RawDocument::from_file(file_path) {
                Ok(source) => sources.push(source),
                Err(e) => errors.push(format!("{file_path:?}: {e}")),
            }
        }

        let schema = match SchemaBuilder::new()
            .load_files(self.schema.to_owned())
            .and_then(|builder| builder.build()) {
            Ok(schema) => schema,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Errors loading the schema: {e}",
                output_utils::RED_X,
            )),
        };

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Errors reading source files:\n{}",
                output_utils::RED_X,
                bullet_list(&errors),
            ));
        }

        let mut config = Config::new(schema, &self.out);
        config.connection_directive = self.connection_directive;
        config.connection_name_arg = self.connection_name_arg;
        config.framework = self.framework;
        config.quiet = self.quiet;
        config.write_sources = self.write_sources;

        let report = match compile(&config, &sources, &FsWriter) {
            Ok(report) => report,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Compilation failed: {e}",
                output_utils::RED_X,
            )),
        };

        report_outcome(&report, &config)
    }
}

/// Renders a compile report. Failures are listed after the summary of what
/// did succeed.
fn report_outcome(report: &CompileReport, config: &Config) -> CommandResult {
    let num_transformed = report.files.iter()
        .filter(|file| file.outcome.is_ok())
        .count();
    let num_rewritten = report.files.iter()
        .filter(|file| file.outcome.as_ref().is_ok_and(|f| f.rewritten))
        .count();
    let summary = format!(
        concat!(
            "  * Transformed {} of {} source files.\n",
            "  * Rewrote {} source files.\n",
            "  * Wrote {} artifacts to {:?}.",
        ),
        num_transformed,
        report.files.len(),
        num_rewritten,
        report.artifacts.written.len(),
        config.artifact_directory,
    );

    if report.is_success() {
        return CommandResult::stdout(format_args!(
            "{} All GraphQL compiled successfully:\n{summary}",
            output_utils::GREEN_CHECK,
        ));
    }

    let failures = report.failed_files()
        .map(|e| e.to_string())
        .chain(report.artifacts.failed.iter().map(|e| e.to_string()))
        .collect::<Vec<_>>();
    CommandResult::stderr(format_args!(
        "{} GraphQL compiled with errors:\n{summary}\n\n{} {} errors:\n{}",
        output_utils::RED_X,
        output_utils::RED_X,
        failures.len(),
        bullet_list(&failures),
    ))
}

fn bullet_list(items: &[String]) -> String {
    items.iter()
        .map(|item| format!("  * {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use libgraphql_compiler::MemoryWriter;

    fn config() -> Config {
        let schema = SchemaBuilder::build_from_str(
            "type Query { viewer: User } type User { id: ID! name: String }",
        ).unwrap();
        Config::new(schema, "runtime")
    }

    #[test]
    fn partial_failure_reports_what_succeeded() {
        let config = config();
        let sources = vec![
            RawDocument::new("ok.svelte", "<script>query(graphql`query Ok { viewer { id } }`)</script>"),
            RawDocument::new("broken.svelte", "<script>query(graphql`query Broken { viewer { age } }`)</script>"),
        ];
        let report = compile(&config, &sources, &MemoryWriter::new()).unwrap();

        let result = report_outcome(&report, &config);

        assert!(result.stdout.is_none());
        let stderr = result.stderr.unwrap();
        assert!(stderr.contains("Transformed 1 of 2 source files."), "{stderr}");
        assert!(stderr.contains("Wrote 1 artifacts"), "{stderr}");
        assert!(stderr.contains("1 errors:"), "{stderr}");
        assert!(stderr.contains("broken.svelte"), "{stderr}");
    }

    #[test]
    fn success_goes_to_stdout() {
        let config = config();
        let sources = vec![
            RawDocument::new("ok.svelte", "<script>query(graphql`query Ok { viewer { id } }`)</script>"),
        ];
        let report = compile(&config, &sources, &MemoryWriter::new()).unwrap();

        let result = report_outcome(&report, &config);

        assert!(result.stderr.is_none());
        assert!(result.stdout.unwrap().contains("Transformed 1 of 1 source files."));
    }
}

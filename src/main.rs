use a11y_autoid::cli::commands::{
    GenerateArgs, ResolveArgs, cmd_generate, cmd_resolve, cmd_sanitize, init_logging,
};
use a11y_autoid::cli::config::{Cli, Commands, build_identifier_config, load_config};
use a11y_autoid::config::config_model::GenerationMode;
use a11y_autoid::export::test_code::TestDialect;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let file_config = load_config(cli.config.as_deref());

    // Resolve identifier settings: CLI > config file > defaults
    let mode = cli.mode.as_deref().map(str::parse::<GenerationMode>).transpose()?;
    let config = build_identifier_config(
        &file_config,
        cli.namespace.as_deref(),
        mode,
        cli.disable_auto_ids,
    );

    match cli.command {
        Commands::Generate {
            id,
            content,
            role,
            context,
            label,
            screen,
        } => {
            let args = GenerateArgs {
                id: id.as_deref(),
                content: content.as_deref(),
                role: &role,
                context: &context,
                label: label.as_deref(),
                screen: screen.as_deref(),
            };
            println!("{}", cmd_generate(config, &args));
        }
        Commands::Sanitize { label } => {
            println!("{}", cmd_sanitize(&label));
        }
        Commands::Resolve {
            tree,
            screen,
            audit,
            export_dir,
            dialect,
            clipboard,
            trace,
            debug_log,
        } => {
            let dialect = match dialect.as_deref() {
                Some(d) => d.parse::<TestDialect>()?,
                None => file_config.export.dialect,
            };
            let export_dir = export_dir.or_else(|| file_config.export.output_dir.clone());
            let args = ResolveArgs {
                tree: &tree,
                screen: screen.as_deref(),
                audit: audit || file_config.export.audit,
                export_dir: export_dir.as_deref(),
                dialect,
                clipboard,
                trace: trace.as_deref(),
                debug_log,
            };
            print!("{}", cmd_resolve(config, &args)?);
        }
    }

    Ok(())
}

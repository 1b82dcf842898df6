use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use plugin_release::cargo_toml::CargoToml;
use plugin_release::changelog::{self, ChangelogRequest};
use plugin_release::config::{self, Config};
use plugin_release::plugin::{Platform, PluginFileBuilder};
use plugin_release::process::{CommandRunner, ProcessRunner};
use plugin_release::ui;
use plugin_release::version::{self, VersionBump};
use plugin_release::ReleaseError;

#[derive(Parser)]
#[command(
    name = "plugin-release",
    about = "Release automation for process plugins: changelogs, version bumps, and plugin file assembly"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate release notes between two version tags
    Changelog {
        /// The version being released
        version_to: String,

        /// Version to diff from (defaults to the closest lesser release tag)
        #[arg(long)]
        from: Option<String>,
    },

    /// Bump the manifest version, then commit, tag, and push
    Publish {
        #[arg(long, help = "Bump the major version")]
        major: bool,

        #[arg(long, help = "Bump the minor version")]
        minor: bool,

        #[arg(long, help = "Bump the patch version (default)")]
        patch: bool,

        /// Path to the Cargo.toml to bump (defaults to the configured path)
        cargo_toml_path: Option<String>,
    },

    /// Assemble the plugin distribution file from release archives
    PluginFile {
        #[arg(long, help = "Plugin version (defaults to the manifest version)")]
        version: Option<String>,

        #[arg(long, help = "Only the current platform, referencing a local zip file")]
        test: bool,

        #[arg(long, default_value = "plugin.json", help = "Output path")]
        output: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let runner = ProcessRunner::new();

    let result = match args.command {
        Command::Changelog { version_to, from } => run_changelog(&runner, version_to, from),
        Command::Publish {
            major,
            minor,
            patch: _,
            cargo_toml_path,
        } => {
            let bump = if major {
                VersionBump::Major
            } else if minor {
                VersionBump::Minor
            } else {
                VersionBump::Patch
            };
            run_publish(&runner, &config, bump, cargo_toml_path)
        }
        Command::PluginFile {
            version,
            test,
            output,
        } => run_plugin_file(&config, version, test, &output),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run_changelog(
    runner: &dyn CommandRunner,
    version_to: String,
    from: Option<String>,
) -> plugin_release::Result<()> {
    let request = ChangelogRequest {
        version_to,
        version_from: from,
    };
    let changelog = changelog::generate_changelog(runner, &request)?;
    println!("{}", changelog);
    Ok(())
}

fn run_publish(
    runner: &dyn CommandRunner,
    config: &Config,
    bump: VersionBump,
    path_override: Option<String>,
) -> plugin_release::Result<()> {
    let path = path_override.unwrap_or_else(|| config.manifest.cargo_toml_path.clone());

    ui::display_step("Retrieving current Cargo.toml version...");
    let manifest = CargoToml::new(&path);
    let current_version = manifest.version()?;
    ui::display_light(&format!("  Found version: {}", current_version));

    let new_version = version::bump_version(&version::parse_version(&current_version)?, &bump);
    let version_text = new_version.to_string();

    ui::display_step(&format!("Setting new version to {}...", version_text));
    manifest.set_version(&version_text)?;

    ui::display_step("Running cargo update...");
    runner.run("cargo", &["update", "--workspace"])?;

    ui::display_step("Committing to git...");
    runner.run("git", &["add", "."])?;
    runner.run("git", &["commit", "-m", &version_text])?;

    ui::display_step("Pushing to main...");
    runner.run("git", &["push", "-u", "origin", "HEAD"])?;

    ui::display_step("Tagging...");
    runner.run("git", &["tag", &version_text])?;
    runner.run("git", &["push", "origin", &version_text])?;

    ui::display_success(&format!("Published {}", version_text));
    Ok(())
}

fn run_plugin_file(
    config: &Config,
    version_arg: Option<String>,
    test: bool,
    output: &str,
) -> plugin_release::Result<()> {
    let name = &config.plugin.name;
    if name.is_empty() {
        return Err(ReleaseError::config(
            "plugin name is not configured (set [plugin] name in pluginrelease.toml)",
        ));
    }

    let version = match version_arg {
        Some(version) => version,
        None => CargoToml::new(&config.manifest.cargo_toml_path).version()?,
    };

    let mut builder = PluginFileBuilder::new(name, &version);

    if test {
        // Local smoke test: only the current platform, with a zip file in
        // the current folder standing in for the release download.
        let platform = Platform::current()?;
        let zip_file_name = platform.zip_file_name(name);
        let checksum = builder.add_platform(platform, Path::new(&zip_file_name), &zip_file_name)?;
        ui::display_light(&format!("{}: {}", zip_file_name, checksum));
    } else {
        let repo = config.plugin.repo.as_deref().ok_or_else(|| {
            ReleaseError::config(
                "plugin repo is not configured (set [plugin] repo in pluginrelease.toml)",
            )
        })?;
        for platform in &config.plugin.platforms {
            let zip_file_name = platform.zip_file_name(name);
            let zip_url = format!(
                "https://github.com/{}/releases/download/{}/{}",
                repo, version, zip_file_name
            );
            let checksum = builder.add_platform(*platform, Path::new(&zip_file_name), &zip_url)?;
            ui::display_light(&format!("{}: {}", zip_file_name, checksum));
        }
    }

    builder.write_to_path(Path::new(output))?;
    ui::display_light(&format!("{}: {}", output, builder.output_checksum()?));
    ui::display_success(&format!("Wrote {}", output));
    Ok(())
}

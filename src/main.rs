use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use dialoguer::Select;

use z64cs::command::EmitOptions;
use z64cs::parser;

fn main() {
    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("Usage: z64cs <cutscene .c files>...");
        eprintln!("Parses cutscene scripts, reports problems, and writes normalized copies.");
        return;
    }

    let modes = [
        "Macro names (CS_CMD_CONTINUE, DEG_TO_BINANG, enum identifiers)",
        "Raw numbers",
    ];
    let selection = Select::new()
        .with_prompt("Select the output style")
        .items(&modes)
        .default(0)
        .interact()
        .unwrap_or(0);
    let opts = EmitOptions {
        use_macros: selection == 0,
    };

    for file in &files {
        if let Err(err) = process(file, opts) {
            eprintln!("Failure: {:#}", err);
        }
    }
}

fn process(file: &str, opts: EmitOptions) -> Result<()> {
    eprint!("Importing \"{}\"... ", file);
    let source =
        fs::read_to_string(file).with_context(|| format!("failed to read `{}`", file))?;

    let report = parser::parse(&source);
    if report.cutscenes.is_empty() {
        eprintln!("Failure: no cutscene parsed");
        for error in &report.errors {
            eprintln!("  {}", error);
        }
        return Ok(());
    }
    eprintln!("Success!");
    for error in &report.errors {
        eprintln!("  Skipped a cutscene: {}", error);
    }

    for cutscene in &report.cutscenes {
        for violation in cutscene.validate() {
            eprintln!("  Warning in \"{}\": {}", cutscene.name, violation);
        }
    }

    let out_path = "out";
    fs::create_dir_all(out_path)
        .with_context(|| format!("failed to create the output directory `{}`", out_path))?;

    for cutscene in &report.cutscenes {
        let mut path = PathBuf::from(out_path).join(format!("{}.c", cutscene.name));
        if path.exists() {
            let uid = uuid::Uuid::new_v4().to_simple().to_string();
            path = PathBuf::from(out_path)
                .join(format!("{}_{}.c", cutscene.name, &uid[..uid.len() / 2]));
        }

        fs::write(&path, cutscene.serialize(opts))
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        eprintln!(
            "Exported \"{}\" successfully!",
            path.file_name()
                .unwrap_or_default()
                .to_str()
                .unwrap_or("<INVALID NAME>"),
        );
    }
    Ok(())
}

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("scp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("CLI browser for SCP Wiki entries")
        .arg(
            clap::arg!([NUMBER] "The SCP number to read (1-7999)")
                .value_parser(clap::value_parser!(u32).range(1..=7999)),
        )
        .arg(clap::arg!(-d --destination "Open the folder where downloaded entries are kept"))
        .arg(clap::arg!(-a --audio "Narrate the entry without showing its text"))
        .arg(clap::arg!(-A --audio_text "Narrate the entry and show its text").long("audio-text"))
        .arg(clap::arg!(-t --no_save "Don't save the retrieved entry as a .txt file").long("no-save"))
        .arg(clap::arg!(-r --random "Read a random entry"))
        .arg(clap::arg!(-g --get_all "Download every entry into the archive folder").long("get-all"))
        .arg(clap::arg!(-o --overwrite "Fetch the entry again even if a saved copy exists"))
        .arg(clap::arg!(-u --hide_url "Don't print the entry's source URL").long("hide-url"))
        .arg(
            clap::arg!(--file <FILE> "Read a saved entry page instead of fetching it")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(--dir <DIR> "Folder for downloaded entries")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--width <COLS> "Text width in columns").default_value("90"))
        .arg(clap::arg!(--no_center "Print against the left edge instead of centering").long("no-center"))
        .arg(clap::arg!(--rate <WPM> "Narration speed in words per minute").default_value("175"))
        .arg(clap::arg!(--voice <NAME> "Narration voice"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").long("user-agent"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "scp", &completions_dir).unwrap();
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}

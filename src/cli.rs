use clap::{value_parser, crate_version, Arg, Command, ValueHint};

const IN_HELP: &str = "if the functions are piped, omit the `--file` option";
const F_LONG_HELP: &str = "text file with one function per line, each function being the printed
list of its instructions, e.g., ['push rbp', 'mov rbp, rsp', 'ret'], blank lines are skipped";
const G_LONG_HELP: &str = "plain text glossary, the first character of the file is the category marker,
any line containing the marker names a category, the lines that follow are its mnemonics,
if omitted the built-in x86-64 glossary is used";
const CONFIG_LONG_HELP: &str = "JSON string with settings, keys that are omitted keep their defaults, e.g.,
{\"tokenizer\": {\"delimiter\": \"'\", \"noise\": [\"[\", \"]\", \",\"]}, \"aggregator\": {\"decimals\": 2, \"degenerate\": \"error\"}}";

fn file_arg(help: &'static str, req: bool, shell_hint: bool) -> Arg {
    let ans = Arg::new("file").short('f').long("file").value_name("PATH").required(req).help(help)
        .long_help(F_LONG_HELP);
    if shell_hint {
        ans.value_hint(ValueHint::FilePath)
    } else {
        ans
    }
}

fn glossary_arg() -> Arg {
    Arg::new("glossary").short('g').long("glossary").value_name("PATH").help("path to a text glossary")
        .long_help(G_LONG_HELP)
        .value_hint(ValueHint::FilePath)
        .required(false)
}

fn config_arg() -> Arg {
    Arg::new("config").short('c').long("config").value_name("JSON").help("settings as a JSON string")
        .long_help(CONFIG_LONG_HELP)
        .required(false)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

pub fn build_cli() -> Command {
    let long_help = "asmprep is always invoked with exactly one of several subcommands.
The subcommands read functions from a file or from a pipe and write to stdout.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
feature table as CSV:     `asmprep table -f functions.txt > features.csv`
custom glossary:          `asmprep table -f functions.txt -g glossary.txt`
feature table as JSON:    `cat functions.txt | asmprep table --format json --indent 2`
keep going past misses:   `asmprep table -f functions.txt -c '{\"aggregator\":{\"degenerate\":\"drop\"}}'`
start a custom glossary:  `asmprep glossary > glossary.txt`";

    let mut main_cmd = Command::new("asmprep")
        .about("Turns disassembled functions into instruction category features.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("table")
            .arg(file_arg("path to the functions",false,true))
            .arg(glossary_arg())
            .arg(config_arg())
            .arg(
                Arg::new("format").long("format").help("output format").value_name("FORMAT")
                    .value_parser(["csv","json"])
                    .required(false)
                    .default_value("csv"),
            )
            .arg(indent_arg())
            .about("write the table of category shares to stdout")
            .after_help(IN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("vocab")
            .arg(file_arg("path to the functions",false,true))
            .arg(config_arg())
            .arg(indent_arg())
            .about("write the mnemonics and their occurrence totals as a JSON string to stdout")
            .after_help(IN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("glossary")
            .arg(
                Arg::new("marker").short('m').long("marker").help("category marker").value_name("CHAR")
                    .value_parser(value_parser!(char))
                    .required(false)
                    .default_value("*"),
            )
            .about("write the built-in glossary to stdout in the text format"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(
                Arg::new("shell").short('s').long("shell").help("shell target").value_name("NAME")
                    .required(true)
                    .value_parser(["bash","elv","fish","ps1","zsh"])
            )
            .about("write completions script to stdout for the specified shell")
    );
    return main_cmd;
}

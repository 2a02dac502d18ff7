use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "rexgen", author, version, about, long_about = None)]
pub struct Cli {
    #[clap(help = PATTERN_HELP)]
    pub pattern: String,

    #[clap(
        default_value_t = 1,
        short = 'n',
        long = "number",
        help = "The number of strings to generate."
    )]
    pub number: usize,

    #[clap(
        short = 'd',
        long = "distinct-runes",
        help = "Weight character classes by their size so that every distinct string is equally likely."
    )]
    pub distinct_runes: bool,

    #[clap(short = 'p', long = "prob", help = PROB_HELP)]
    pub prob: Option<f64>,

    #[clap(default_value = "", short = 'f', long = "flags", help = FLAGS_HELP)]
    pub flags: String,

    #[clap(
        short = 'v',
        parse(from_occurrences),
        takes_value = false,
        multiple_occurrences = true,
        help = VERBOSE_HELP,
    )]
    pub verbosity: u8,
}

const PATTERN_HELP: &str = r##"The regular expression to generate strings for.
Examples: "[abc]{1,3}", "\d{2,3}-\d{3,4}-\d{3,4}", "(foo|bar)+baz"
"##;
const PROB_HELP: &str = "Take the primary edge of every branch with this fixed probability \
instead of weighting branches by language size. Must be strictly between 0 and 1.";
const FLAGS_HELP: &str = r##"Parser flag characters: "i" (case insensitive), "m" (multi line),
"s" (dot matches newline), "U" (swap greed), "x" (ignore whitespace), "o" (octal escapes).
"##;
const VERBOSE_HELP: &str = "Enable debug logging. Repeat up to 3 times to increase verbosity.";

use std::fmt::Write as _;

/// (label, years) rows of one timespan block.
type Block<'a> = (&'a [&'a str], &'a [(&'a str, &'a [i32])]);

const PRESIDENTS: Block<'static> = (
    &["US presidents", "took office", "left office"],
    &[
        ("McKinley", &[1897, 1901]),
        ("T. Roosevelt", &[1901, 1909]),
        ("Taft", &[1909, 1913]),
        ("Wilson", &[1913, 1921]),
        ("Harding", &[1921, 1923]),
        ("Coolidge", &[1923, 1929]),
        ("Hoover", &[1929, 1933]),
        ("F. Roosevelt", &[1933, 1945]),
        ("Truman", &[1945, 1953]),
        ("Eisenhower", &[1953, 1961]),
        ("Kennedy", &[1961, 1963]),
        ("Johnson", &[1963, 1969]),
        ("Nixon", &[1969, 1974]),
        ("Ford", &[1974, 1977]),
        ("Carter", &[1977, 1981]),
        ("Reagan", &[1981, 1989]),
        ("Bush", &[1989, 1993]),
        ("Clinton", &[1993, 2001]),
        ("G. W. Bush", &[2001, 2009]),
    ],
);

const WARS: Block<'static> = (
    &["Wars", "war", "US involvement", "end"],
    &[
        ("WWI", &[1914, 1917, 1918]),
        ("WWII", &[1939, 1941, 1945]),
        ("Vietnam", &[1955, 1965, 1975]),
    ],
);

const EVENTS: Block<'static> = (
    &["Events", "start", "end"],
    &[
        ("Crash", &[1929, 1929]),
        ("Depression", &[1930, 1939]),
        ("Moon landing", &[1969, 1969]),
        ("Berlin Wall", &[1989, 1989]),
    ],
);

fn main() {
    let mut text = String::new();
    for (i, (header, rows)) in [PRESIDENTS, WARS, EVENTS].iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&header.join("\t"));
        text.push('\n');
        for (label, years) in rows.iter() {
            let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            writeln!(text, "{label}\t{}", years.join("\t")).expect("writing to a String");
        }
    }

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "timespan_data.tsv".to_string());
    std::fs::write(&output_path, text).expect("Failed to write timespan file");

    println!("Wrote 3 timespans to {output_path}");
}

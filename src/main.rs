use std::{env, fs::read_to_string, path::PathBuf, process::exit, time::Instant};

use sigil::{
    display_error,
    errors::errors::Error,
    lexer::lexer::Lexer,
    parser::parser::parse,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    let (file_path, dump_ast) = match args.as_slice() {
        [_, path] => (path.as_str(), false),
        [_, path, flag] if flag == "--ast" => (path.as_str(), true),
        _ => {
            eprintln!("Usage: sigil <file> [--ast]");
            exit(2);
        }
    };

    let path = PathBuf::from(file_path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from(file_path));

    let file_contents = match read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", path.display(), err);
            exit(1);
        }
    };

    let result = if dump_ast {
        dump_tree(&file_contents, file_name)
    } else {
        dump_tokens(&file_contents, file_name)
    };

    if let Err(error) = result {
        print!("{}", display_error(&error, &file_contents));
        exit(1);
    }
}

fn dump_tokens(source: &str, file_name: String) -> Result<(), Error> {
    let start = Instant::now();
    let mut lexer = Lexer::new(source, Some(file_name));

    while lexer.has_next() {
        println!("{}", lexer.next_token()?);
    }

    eprintln!("Tokenized in {:?}", start.elapsed());
    Ok(())
}

fn dump_tree(source: &str, file_name: String) -> Result<(), Error> {
    let start = Instant::now();
    let ast = parse(source, Some(file_name))?;

    eprintln!("Parsed in {:?}", start.elapsed());

    match serde_json::to_string_pretty(&ast) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Failed to serialize syntax tree: {}", err);
            exit(1);
        }
    }
    Ok(())
}

mod print;

pub(crate) use print::{
    print_books, print_config, print_history, print_links, print_messages, print_words,
};

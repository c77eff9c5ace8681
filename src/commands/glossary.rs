use log::error;
use crate::glossary::Glossary;
use crate::STDRESULT;

pub fn glossary(cmd: &clap::ArgMatches) -> STDRESULT {
    let marker = cmd.get_one::<char>("marker").copied().unwrap_or('*');
    match Glossary::builtin().to_text(marker) {
        Ok(text) => {
            print!("{}",text);
            Ok(())
        },
        Err(e) => {
            error!("cannot use `{}` as the category marker",marker);
            Err(Box::new(e))
        }
    }
}

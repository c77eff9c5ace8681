use super::categorizer::{self,CategoryAssignment,Error};
use super::glossary::{Glossary,GlossaryProvider};
use super::glossary::scanner::{scan,TextGlossary};
use super::tokenizer::Vocabulary;

fn vocab(list: &[&str]) -> Vocabulary {
    list.iter().collect()
}

fn slots(assignment: &CategoryAssignment) -> Vec<(String,usize,String)> {
    assignment.iter().map(|((c,p),m)| (c.to_string(),p,m.to_string())).collect()
}

fn small_glossary() -> Glossary {
    let cats = ["Data transfer","Arithmetic","Control flow"].iter().map(|s| s.to_string()).collect();
    let dict = [
        ("Data transfer","mov"),("Data transfer","lea"),
        ("Arithmetic","add"),("Arithmetic","sub"),
        ("Control flow","jmp"),("Control flow","call"),("Control flow","ret")
    ].iter().map(|(c,m)| (c.to_string(),m.to_string())).collect();
    Glossary::new(cats,dict).expect("bad glossary")
}

/// Collects warnings so tests can check what the library reports
mod warnings {
    use std::sync::{Mutex,Once};

    struct Capture {
        lines: Mutex<Vec<String>>
    }

    static CAPTURE: Capture = Capture { lines: Mutex::new(Vec::new()) };
    static INIT: Once = Once::new();

    impl log::Log for Capture {
        fn enabled(&self,metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }
        fn log(&self,record: &log::Record) {
            if self.enabled(record.metadata()) {
                if let Ok(mut lines) = self.lines.lock() {
                    lines.push(record.args().to_string());
                }
            }
        }
        fn flush(&self) {}
    }

    pub fn install() {
        INIT.call_once(|| {
            if log::set_logger(&CAPTURE).is_ok() {
                log::set_max_level(log::LevelFilter::Warn);
            }
        });
    }

    /// Captured warnings containing `pattern`, tests run in parallel so patterns should be specific
    pub fn containing(pattern: &str) -> Vec<String> {
        match CAPTURE.lines.lock() {
            Ok(lines) => lines.iter().filter(|l| l.contains(pattern)).cloned().collect(),
            Err(_) => Vec::new()
        }
    }
}

mod text_mode {
    use super::*;

    #[test]
    fn only_vocabulary_assigned() {
        let g = scan("*Data transfer*\nmov\nlea\n*Arithmetic*\nadd\nsub\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","sub"]),&g).expect("categorize failed");
        assert_eq!(a.column_names(),vec!["Data transfer","Arithmetic"]);
        assert_eq!(slots(&a),vec![
            ("Data transfer".to_string(),0,"mov".to_string()),
            ("Arithmetic".to_string(),0,"sub".to_string())
        ]);
        assert_eq!(a.get("Arithmetic",0),Some("sub"));
        assert_eq!(a.get("Arithmetic",1),None);
        assert!(!a.is_insufficient());
    }

    #[test]
    fn positions_count_assigned_only() {
        let g = scan("*A*\nmov\nlea\nxchg\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","xchg"]),&g).expect("categorize failed");
        assert_eq!(a.get("A",0),Some("mov"));
        assert_eq!(a.get("A",1),Some("xchg"));
    }

    #[test]
    fn empty_categories_are_columns() {
        let g = scan("*A*\nmov\n*B*\nadd\n*C*\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov"]),&g).expect("categorize failed");
        assert_eq!(a.len(),3);
        assert_eq!(a.assigned(),1);
    }

    #[test]
    fn insufficient_glossary_flagged() {
        // 5 mnemonics in the vocabulary but only 3 mnemonic lines
        let g = scan("*A*\nmov\nlea\n*B*\nadd\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","add","jmp","ret","nop"]),&g).expect("categorize failed");
        assert!(a.is_insufficient());
        assert_eq!(a.len(),2);
        assert_eq!(a.assigned(),2);
    }

    #[test]
    fn insufficient_glossary_warns() {
        warnings::install();
        // 7 mnemonic lines against 11 mnemonics
        let g = scan("*W1*\nmov\nlea\nxchg\n*W2*\nadd\nsub\nmul\ndiv\n").expect("scan failed");
        let v = vocab(&["mov","add","jmp","ret","nop","call","push","pop","xor","and","or"]);
        let a = categorizer::categorize_text(&v,&g).expect("categorize failed");
        assert!(a.is_insufficient());
        assert_eq!(warnings::containing("glossary has 7 mnemonic lines but the dataset has 11 mnemonics").len(),1);
        assert!(warnings::containing("wrong or insufficient").len() >= 1);
        // a sufficient glossary stays quiet
        let g = scan("*W3*\nmov\nlea\nxchg\nmovsx\nmovzx\ncmov\nadd\nsub\nmul\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","add","cpuid"]),&g).expect("categorize failed");
        assert!(!a.is_insufficient());
        assert!(warnings::containing("glossary has 9 mnemonic lines").is_empty());
    }

    #[test]
    fn multi_category_warns() {
        warnings::install();
        let g = scan("*M1*\ncmpxchg\n*M2*\ncmpxchg\n").expect("scan failed");
        categorizer::categorize_text(&vocab(&["cmpxchg"]),&g).expect("categorize failed");
        assert_eq!(warnings::containing("`cmpxchg` is in categories `M1` and `M2`").len(),1);
    }

    #[test]
    fn sufficiency_counts_blank_lines() {
        // a blank line counts as a mnemonic line for the sufficiency check
        let g = scan("*A*\nmov\n\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","add"]),&g).expect("categorize failed");
        assert!(!a.is_insufficient());
    }

    #[test]
    fn multi_category_kept_in_both() {
        let g = scan("*A*\nmov\n*B*\nmov\nadd\n").expect("scan failed");
        let a = categorizer::categorize_text(&vocab(&["mov","add"]),&g).expect("categorize failed");
        assert_eq!(a.get("A",0),Some("mov"));
        assert_eq!(a.get("B",0),Some("mov"));
        assert_eq!(a.get("B",1),Some("add"));
    }

    #[test]
    fn no_categories() {
        // scanned text always opens a category, so build the empty glossary by hand
        let g = TextGlossary {
            marker: '*',
            categories: Vec::new(),
            lines: 0,
            marker_lines: 0
        };
        assert!(matches!(categorizer::categorize_text(&vocab(&["mov"]),&g),Err(Error::NoCategories)));
    }
}

mod provider_mode {
    use super::*;

    #[test]
    fn every_category_present() {
        let a = categorizer::categorize_provider(&vocab(&["jmp","mov"]),&small_glossary()).expect("categorize failed");
        assert_eq!(a.column_names(),vec!["Data transfer","Arithmetic","Control flow"]);
        assert_eq!(slots(&a),vec![
            ("Data transfer".to_string(),0,"mov".to_string()),
            ("Control flow".to_string(),0,"jmp".to_string())
        ]);
        assert!(a.categories()[1].mnemonics.is_empty());
    }

    #[test]
    fn provider_order_kept() {
        let a = categorizer::categorize_provider(&vocab(&["ret","call","jmp"]),&small_glossary()).expect("categorize failed");
        assert_eq!(a.categories()[2].mnemonics,vec!["jmp","call","ret"]);
    }

    #[test]
    fn deterministic() {
        let v = vocab(&["mov","add","call","xor","ret"]);
        let g = Glossary::builtin();
        let a1 = categorizer::categorize_provider(&v,&g).expect("categorize failed");
        let a2 = categorizer::categorize_provider(&v,&g).expect("categorize failed");
        assert_eq!(a1,a2);
        assert_eq!(a1.len(),g.get_categories().len());
    }

    struct Inconsistent;
    impl GlossaryProvider for Inconsistent {
        fn get_categories(&self) -> Vec<String> {
            vec!["A".to_string()]
        }
        fn get_dictionary(&self) -> Vec<(String,String)> {
            vec![("A".to_string(),"mov".to_string()),("Z".to_string(),"add".to_string())]
        }
    }

    struct Nothing;
    impl GlossaryProvider for Nothing {
        fn get_categories(&self) -> Vec<String> {
            Vec::new()
        }
        fn get_dictionary(&self) -> Vec<(String,String)> {
            Vec::new()
        }
    }

    struct Repeated;
    impl GlossaryProvider for Repeated {
        fn get_categories(&self) -> Vec<String> {
            vec!["A".to_string(),"B".to_string(),"A".to_string()]
        }
        fn get_dictionary(&self) -> Vec<(String,String)> {
            vec![("A".to_string(),"mov".to_string()),("B".to_string(),"add".to_string())]
        }
    }

    #[test]
    fn unchecked_providers() {
        let v = vocab(&["mov"]);
        assert!(matches!(categorizer::categorize_provider(&v,&Inconsistent),Err(Error::UnknownCategory(c)) if c=="Z"));
        assert!(matches!(categorizer::categorize_provider(&v,&Nothing),Err(Error::NoCategories)));
        assert!(matches!(categorizer::categorize_provider(&v,&Repeated),Err(Error::DuplicateCategory(c)) if c=="A"));
    }
}

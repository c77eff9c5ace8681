use super::tokenizer::{Tokenizer,Vocabulary};
use super::settings::Settings;

fn test_tokenizer(functions: &[&str],expected_vocab: &[&str],expected_seqs: &[&[&str]]) {
    let tokenizer = Tokenizer::new();
    let (vocab,seqs) = tokenizer.tokenize(functions);
    assert_eq!(vocab.as_slice(),expected_vocab);
    assert_eq!(seqs.len(),expected_seqs.len());
    for (actual,expected) in seqs.iter().zip(expected_seqs) {
        assert_eq!(actual,expected);
    }
}

#[test]
fn printed_list() {
    test_tokenizer(
        &["['jmp qword ptr [rip + 0x220882]', 'jmp qword ptr [rip + 0x220832]']"],
        &["jmp"],
        &[&["jmp","jmp"]]
    );
}

#[test]
fn bare_quotes() {
    test_tokenizer(
        &["'mov eax, ebx''add eax, 1'","'jmp 0x10''jmp 0x20'"],
        &["mov","add","jmp"],
        &[&["mov","add"],&["jmp","jmp"]]
    );
}

#[test]
fn first_seen_order() {
    test_tokenizer(
        &["['push rbp', 'mov rbp, rsp', 'pop rbp', 'ret']","['xor eax, eax', 'ret']","['mov eax, 1', 'push rbx']"],
        &["push","mov","pop","ret","xor"],
        &[&["push","mov","pop","ret"],&["xor","ret"],&["mov","push"]]
    );
}

#[test]
fn prefixes_and_no_operands() {
    // only the first word counts, so a prefix stands in for the instruction
    test_tokenizer(
        &["['rep stosq qword ptr [rdi], rax', 'nop', 'lock cmpxchg dword ptr [rdx], ecx']"],
        &["rep","nop","lock"],
        &[&["rep","nop","lock"]]
    );
}

#[test]
fn empty_function() {
    test_tokenizer(&["","['ret']"],&["ret"],&[&[],&["ret"]]);
}

#[test]
fn no_functions() {
    let (vocab,seqs) = Tokenizer::new().tokenize::<&str>(&[]);
    assert!(vocab.is_empty());
    assert!(seqs.is_empty());
}

#[test]
fn punctuation_never_tokens() {
    let functions = [
        "['mov eax, [rbx]', ', ', '[', ']', 'add eax, 1']",
        "[', ', ']']",
        "['[ rbp ]', 'sub rsp, 8']"
    ];
    let (vocab,seqs) = Tokenizer::new().tokenize(&functions);
    for tok in vocab.iter().chain(seqs.iter().flatten()) {
        assert!(tok!="[" && tok!="]" && tok!=",");
        assert!(!tok.is_empty());
    }
    assert_eq!(vocab.as_slice(),&["mov","add","sub"]);
}

#[test]
fn deterministic() {
    let functions = ["['mov a, b', 'call f', 'mov c, d']","['lea rax, [rip]', 'call g', 'ret']"];
    let tokenizer = Tokenizer::new();
    let (v1,s1) = tokenizer.tokenize(&functions);
    let (v2,s2) = tokenizer.tokenize(&functions);
    assert_eq!(v1,v2);
    assert_eq!(s1,s2);
}

#[test]
fn custom_delimiter() {
    let settings = super::settings::parse(r##"{"tokenizer": {"delimiter": "|", "noise": ["#"]}}"##).expect("bad settings");
    let mut tokenizer = Tokenizer::new();
    tokenizer.set_config(&settings);
    let (vocab,seqs) = tokenizer.tokenize(&["mov a, b|# comment|add a, 1"]);
    assert_eq!(vocab.as_slice(),&["mov","add"]);
    assert_eq!(seqs[0],vec!["mov","add"]);
    // default settings reproduce the default tokenizer
    tokenizer.set_config(&Settings::new());
    let (vocab,_) = tokenizer.tokenize(&["['mov a, b']"]);
    assert_eq!(vocab.as_slice(),&["mov"]);
}

#[test]
fn vocabulary_set_semantics() {
    let mut vocab: Vocabulary = ["mov","add","mov"].iter().collect();
    assert_eq!(vocab.len(),2);
    assert!(!vocab.insert("add"));
    assert!(vocab.insert("jmp"));
    assert!(vocab.contains("jmp"));
    assert!(!vocab.contains("ret"));
    let order: Vec<&String> = (&vocab).into_iter().collect();
    assert_eq!(order,vec!["mov","add","jmp"]);
}

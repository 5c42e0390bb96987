//! Examples of using the prefix trie
use prefix_trie::PrefixTrie;

fn main() -> Result<(), prefix_trie::Error> {
    let mut trie = PrefixTrie::new();

    for word in &["", "ab", "abaa", "abb", "c", "ca", "cb", "ccc"] {
        trie.add(word)?;
    }

    println!("Stored {} strings: {:?}", trie.len(), trie);
    println!("Starting with \"ab\": {}", trie.count_with_prefix("ab")?);

    // Rank queries work for absent words too
    println!("Position of \"b\": {}", trie.rank("b")?);
    println!("4 after \"\": {:?}", trie.next_string("", 4)?);
    println!("3 after \"abaaa\": {:?}", trie.next_string("abaaa", 3)?);
    println!("2 before \"cb\": {:?}", trie.next_string("cb", -2)?);

    let view = trie.view_subtrie("c")?;
    println!("\nUnder \"c\":");
    for word in &view {
        println!("  {}", word);
    }

    trie.remove("c")?;
    println!("\nAfter removing \"c\": {:?}", trie);

    match trie.add("not valid") {
        Ok(_) => unreachable!(),
        Err(err) => println!("\nRejected: {}", err),
    }

    Ok(())
}

use search_core::{
    AnalyzerConfig, IdfScheme, IndexConfig, MatchMode, QueryWeighting, SearchIndex, StopWords,
};

fn build(texts: &[&'static str]) -> SearchIndex<(usize, &'static str)> {
    build_with(texts, &IndexConfig::default())
}

fn build_with(texts: &[&'static str], cfg: &IndexConfig) -> SearchIndex<(usize, &'static str)> {
    SearchIndex::build(texts.iter().copied().enumerate(), cfg).unwrap()
}

fn ids(hits: &[search_core::SearchHit<'_, (usize, &'static str)>]) -> Vec<u32> {
    hits.iter().map(|h| h.doc_id).collect()
}

#[test]
fn cat_ranks_only_the_cat_document() {
    let idx = build(&["the cat sat", "the dog sat"]);
    assert_eq!(idx.document_frequency("the"), 2);
    assert_eq!(idx.document_frequency("sat"), 2);
    assert_eq!(idx.document_frequency("cat"), 1);
    assert_eq!(idx.document_frequency("dog"), 1);

    let hits = idx.rank("cat", 10);
    assert_eq!(ids(&hits), vec![0]);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[0].document.1, "the cat sat");
}

#[test]
fn document_vectors_have_unit_norm() {
    let idx = build(&[
        "The Hobbit J R R Tolkien",
        "The Lord of the Rings J R R Tolkien",
        "Pride and Prejudice Jane Austen",
        "Emma Jane Austen",
        "",
        "Dune Frank Herbert",
    ]);
    for d in 0..idx.len() as u32 {
        let v = idx.weights(d).unwrap();
        if v.is_empty() {
            continue;
        }
        assert!((v.l2_norm() - 1.0).abs() < 1e-5, "doc {d} norm {}", v.l2_norm());
    }
    assert!(idx.weights(4).unwrap().is_empty());
}

#[test]
fn ubiquitous_term_has_zero_idf_and_no_weight() {
    let idx = build(&["book one", "book two", "book three"]);
    assert_eq!(idx.idf("book"), Some(0.0));
    assert!(idx.postings("book").is_empty());
    for d in 0..3 {
        let book = idx.vocabulary().term_id("book").unwrap();
        assert_eq!(idx.weights(d).unwrap().get(book), None);
    }
    assert!(idx.rank("book", 5).is_empty());
}

#[test]
fn results_are_bounded_sorted_and_tie_broken_by_doc_id() {
    let idx = build(&[
        "alpha beta",
        "gamma delta",
        "alpha beta",
        "alpha alpha beta",
        "alpha beta",
        "epsilon",
    ]);
    let hits = idx.rank("alpha", 3);
    assert_eq!(hits.len(), 3);
    for pair in hits.windows(2) {
        assert!(pair[0].score > pair[1].score || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id));
    }
    // "alpha alpha beta" has the larger alpha share; the rest tie.
    assert_eq!(ids(&hits), vec![3, 0, 2]);
    assert_eq!(ids(&idx.rank("alpha", 10)), vec![3, 0, 2, 4]);
}

#[test]
fn query_equal_to_document_prefers_it_over_unrelated() {
    let idx = build(&["war and peace leo tolstoy", "pride and prejudice jane austen", "dune frank herbert"]);
    let hits = idx.rank("war and peace leo tolstoy", 10);
    assert_eq!(hits[0].doc_id, 0);
    assert!(hits[0].score > 0.0);
    assert!(hits.iter().all(|h| h.doc_id != 2));
}

#[test]
fn ranking_is_idempotent() {
    let idx = build(&["a tale of two cities", "two towers", "cities of the plain"]);
    let first: Vec<(u32, f32)> = idx.rank("two cities", 10).iter().map(|h| (h.doc_id, h.score)).collect();
    let second: Vec<(u32, f32)> = idx.rank("two cities", 10).iter().map(|h| (h.doc_id, h.score)).collect();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn empty_document_never_matches() {
    let idx = build(&["", "hello world"]);
    assert_eq!(idx.len(), 2);
    assert_eq!(ids(&idx.rank("hello", 10)), vec![1]);
    assert!(idx.rank("hello world", 10).iter().all(|h| h.doc_id != 0));
}

#[test]
fn fewer_matches_than_k_are_not_padded() {
    let idx = build(&["rust in action", "programming rust", "rust for rustaceans", "python tricks"]);
    let hits = idx.rank("rust", 10);
    assert_eq!(hits.len(), 3);
    assert_eq!(ids(&hits).len(), 3);
}

#[test]
fn empty_and_unknown_queries_return_nothing() {
    let idx = build(&["the cat sat", "the dog sat"]);
    assert!(idx.rank("", 10).is_empty());
    assert!(idx.rank("   ...  ", 10).is_empty());
    assert!(idx.rank("zebra", 10).is_empty());
    assert!(idx.rank("cat", 0).is_empty());
}

#[test]
fn empty_collection_builds_and_answers_nothing() {
    let idx = build(&[]);
    assert!(idx.is_empty());
    assert_eq!(idx.num_terms(), 0);
    assert!(idx.rank("anything", 10).is_empty());
}

#[test]
fn unknown_terms_are_ignored_in_any_mode() {
    let idx = build(&["the cat sat", "the dog sat"]);
    let with_noise = idx.rank("cat zebra", 10);
    let plain = idx.rank("cat", 10);
    assert_eq!(ids(&with_noise), ids(&plain));
    assert_eq!(with_noise[0].score, plain[0].score);
}

#[test]
fn repeated_query_terms_scale_the_score() {
    let idx = build(&["the cat sat", "the dog sat"]);
    let once = idx.rank("cat", 1)[0].score;
    let twice = idx.rank("cat cat", 1)[0].score;
    assert!((twice - 2.0 * once).abs() < 1e-6);
}

#[test]
fn tfidf_query_weighting_multiplies_by_idf() {
    let texts = ["the cat sat", "the dog sat", "a bird"];
    let tf = build(&texts);
    let cfg = IndexConfig { query_weighting: QueryWeighting::TfIdf, ..IndexConfig::default() };
    let tfidf = build_with(&texts, &cfg);
    let idf = tf.idf("cat").unwrap();
    let plain = tf.rank("cat", 1)[0].score;
    let weighted = tfidf.rank("cat", 1)[0].score;
    assert!((weighted - plain * idf).abs() < 1e-6);
}

#[test]
fn conjunctive_mode_requires_every_term() {
    let texts = ["rust book", "rust guide", "python book", "c primer"];
    let any = build(&texts);
    assert_eq!(ids(&any.rank("rust book", 10)).len(), 3);

    let cfg = IndexConfig { match_mode: MatchMode::All, ..IndexConfig::default() };
    let all = build_with(&texts, &cfg);
    assert_eq!(ids(&all.rank("rust book", 10)), vec![0]);
    assert!(all.rank("rust zebra", 10).is_empty());
}

#[test]
fn smoothed_idf_with_stop_words() {
    let cfg = IndexConfig {
        analyzer: AnalyzerConfig { stop_words: StopWords::English, ..AnalyzerConfig::default() },
        idf: IdfScheme::Smoothed,
        ..IndexConfig::default()
    };
    let idx = build_with(
        &[
            "this is an indexable metadata",
            "this is an indexable super metadata",
            "this is another indexable metadata",
        ],
        &cfg,
    );
    let hits = idx.rank("indexable metadata", 10);
    assert_eq!(ids(&hits), vec![0, 1, 2]);
    let expected = [1.414214, 0.906589, 0.906589];
    for (hit, want) in hits.iter().zip(expected) {
        assert!((hit.score - want).abs() < 1e-4, "got {} want {want}", hit.score);
    }
    assert_eq!(ids(&idx.rank("indexable metadata", 1)), vec![0]);
    assert!(idx.rank("this", 10).is_empty());
}

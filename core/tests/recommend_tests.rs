use plotmatch_core::{build_index, recommend, Error, Movie, SharedIndex};

fn movie(title: &str, overview: &str) -> Movie {
    Movie {
        title: title.into(),
        overview: overview.into(),
        poster_url: format!("https://posters.example/{title}.jpg"),
    }
}

fn sample_corpus() -> Vec<Movie> {
    vec![
        movie("A", "A lonely robot learns to love"),
        movie("B", "A detective solves a murder"),
        movie("C", "A chef opens a restaurant in Paris"),
    ]
}

#[test]
fn empty_corpus_fails_to_build() {
    assert_eq!(build_index(vec![]).unwrap_err(), Error::EmptyCorpus);
}

#[test]
fn recommend_before_build_fails() {
    let shared = SharedIndex::empty();
    assert_eq!(
        shared.recommend("robot", 5).unwrap_err(),
        Error::IndexNotBuilt
    );
}

#[test]
fn robot_story_ranks_robot_movie_first() {
    let index = build_index(sample_corpus()).unwrap();
    let results = recommend(&index, "robot learns love", 5);
    assert_eq!(results[0].title, "A");
    assert!(results[0].score > 0.0);
    let b = results.iter().find(|r| r.title == "B").unwrap();
    assert_eq!(b.score, 0.0);
}

#[test]
fn query_equal_to_overview_ranks_that_movie_first() {
    let corpus = sample_corpus();
    let overview = corpus[2].overview.clone();
    let index = build_index(corpus).unwrap();
    let results = recommend(&index, &overview, 3);
    assert_eq!(results[0].title, "C");
    for r in &results[1..] {
        assert!(results[0].score >= r.score);
    }
    assert!(results[0].score > 0.9);
}

#[test]
fn degenerate_queries_score_zero() {
    let index = build_index(sample_corpus()).unwrap();
    for query in ["", "   ", "the and of", "zyxxyz glorptha"] {
        let results = recommend(&index, query, 5);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score == 0.0), "query {query:?}");
        // zero scores everywhere keeps corpus order
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }
}

#[test]
fn scores_are_bounded_sorted_and_truncated() {
    let index = build_index(sample_corpus()).unwrap();
    let results = recommend(&index, "a lonely detective in paris", 2);
    assert_eq!(results.len(), 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score));
    }

    assert!(recommend(&index, "robot", 0).is_empty());
    assert_eq!(recommend(&index, "robot", 50).len(), 3);
}

#[test]
fn equal_scores_keep_corpus_order() {
    let corpus = vec![
        movie("First", "ghosts haunt the manor"),
        movie("Second", "ghosts haunt the manor"),
        movie("Other", "a heist goes wrong"),
    ];
    let index = build_index(corpus).unwrap();
    let results = recommend(&index, "ghosts haunt manor", 2);
    assert_eq!(results[0].title, "First");
    assert_eq!(results[1].title, "Second");
    assert!(results[0].score > 0.0);
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn builds_are_deterministic() {
    let a = build_index(sample_corpus()).unwrap();
    let b = build_index(sample_corpus()).unwrap();
    assert_eq!(a.vocabulary(), b.vocabulary());
    assert_eq!(a.idf(), b.idf());
    assert_eq!(a.rows(), b.rows());
}

#[test]
fn projection_ignores_unknown_terms() {
    let index = build_index(sample_corpus()).unwrap();
    let known = index.project("robot murder");
    let mixed = index.project("robot murder zyxxyz");
    assert_eq!(known, mixed);
}

#[test]
fn install_swaps_the_served_index() {
    let shared = SharedIndex::empty();
    shared.install(build_index(sample_corpus()).unwrap());
    let results = shared.recommend("robot learns love", 1).unwrap();
    assert_eq!(results[0].title, "A");

    // a rebuild over a different corpus replaces what queries see
    shared.install(build_index(vec![movie("D", "pirates sail the seas")]).unwrap());
    let results = shared.recommend("pirates at sea", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "D");
}

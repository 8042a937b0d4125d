use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use dn_core::{
    categorize, Article, ArticleDraft, CodeGenerator, ContentGenerator, Error, PipelineResult,
    Result, SearchProvider,
};
use futures::future::join_all;
use futures::FutureExt;
use tracing::{error, info, warn};

/// Number of search hits turned into articles per request.
pub const RESULTS_PER_TOPIC: usize = 5;

pub const NO_RESULTS_MESSAGE: &str = "No research results found";

/// Outcome of one code generation task, already flattened to a message on failure.
pub type CodeOutcome = std::result::Result<String, String>;

pub struct NewsPipeline {
    search: Arc<dyn SearchProvider>,
    content: Arc<dyn ContentGenerator>,
    code: Arc<dyn CodeGenerator>,
}

impl NewsPipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        content: Arc<dyn ContentGenerator>,
        code: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self { search, content, code }
    }

    /// Run the whole pipeline for `topic`. Failures are reported inside the result.
    pub async fn run(&self, topic: &str) -> PipelineResult {
        info!("📰 Generating news for \"{}\"", topic);
        let message = match AssertUnwindSafe(self.try_run(topic)).catch_unwind().await {
            Ok(Ok(result)) => {
                info!("✅ {}", result.message);
                return result;
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic) => panic_message(&*panic),
        };
        error!("Error generating news: {}", message);
        PipelineResult::failure(format!("Error generating news: {}", message))
    }

    async fn try_run(&self, topic: &str) -> Result<PipelineResult> {
        let drafts = self.research(topic).await;
        if drafts.is_empty() {
            warn!("{} for \"{}\"", NO_RESULTS_MESSAGE, topic);
            return Ok(PipelineResult::failure(NO_RESULTS_MESSAGE));
        }

        let mut articles: Vec<Article> = drafts.into_iter().map(Article::from).collect();

        info!("💻 Generating code for {} articles", articles.len());
        let outcomes = self.fan_out_code(&articles).await;
        apply_code_outcomes(&mut articles, outcomes);

        Ok(PipelineResult::success(articles))
    }

    /// Search, then categorize and expand each hit one after another.
    async fn research(&self, topic: &str) -> Vec<ArticleDraft> {
        let results = self.search.search(topic, RESULTS_PER_TOPIC).await;
        info!("✨ Found {} search results", results.len());

        let mut drafts = Vec::with_capacity(results.len());
        for (i, result) in results.into_iter().enumerate() {
            let category = categorize(&result.title, &result.snippet);
            info!("🤖 Writing article {} ({}): {}", i + 1, category, result.title);
            let content = self
                .content
                .generate(&result.title, &result.snippet, category)
                .await;
            drafts.push(ArticleDraft::new(result, category, content));
        }
        drafts
    }

    /// Fan out one task per article and wait for all of them.
    async fn fan_out_code(&self, articles: &[Article]) -> Result<Vec<CodeOutcome>> {
        let handles: Vec<_> = articles
            .iter()
            .map(|article| {
                let code = self.code.clone();
                let content = article.full_content.clone();
                tokio::spawn(async move { code.generate_code(&content).await })
            })
            .collect();

        let outcomes: Vec<CodeOutcome> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(Ok(code)) => Ok(code),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(e.to_string()),
            })
            .collect();

        // Outcomes are matched to articles by index; a short batch would misattribute code.
        if outcomes.len() != articles.len() {
            return Err(Error::Pipeline(format!(
                "code generation returned {} results for {} articles",
                outcomes.len(),
                articles.len()
            )));
        }
        Ok(outcomes)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Write code generation outcomes back onto their articles by index.
///
/// A failed batch overwrites every article with the same message.
pub fn apply_code_outcomes(articles: &mut [Article], outcomes: Result<Vec<CodeOutcome>>) {
    match outcomes {
        Ok(outcomes) => {
            for (i, (article, outcome)) in articles.iter_mut().zip(outcomes).enumerate() {
                article.code = match outcome {
                    Ok(code) => code,
                    Err(message) => {
                        warn!("Code generation for article {} failed: {}", i + 1, message);
                        format!("// Error generating code: {}", message)
                    }
                };
            }
        }
        Err(e) => {
            error!("Code generation batch failed: {}", e);
            for article in articles.iter_mut() {
                article.code = format!("// Code generation failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dn_core::{Category, GeneratedContent, SearchResult, CODE_PLACEHOLDER};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedSearch {
        results: Vec<SearchResult>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl FixedSearch {
        fn new(results: Vec<SearchResult>) -> Arc<Self> {
            Arc::new(Self {
                results,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SearchProvider for FixedSearch {
        async fn search(&self, query: &str, count: usize) -> Vec<SearchResult> {
            self.calls.lock().unwrap().push((query.to_string(), count));
            self.results.iter().take(count).cloned().collect()
        }
    }

    #[derive(Default)]
    struct EchoContent {
        calls: AtomicUsize,
        categories: Mutex<Vec<Category>>,
    }

    #[async_trait]
    impl ContentGenerator for EchoContent {
        async fn generate(
            &self,
            title: &str,
            snippet: &str,
            category: Category,
        ) -> GeneratedContent {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.categories.lock().unwrap().push(category);
            GeneratedContent {
                full_content: format!("content for {}", title),
                summary: format!("summary of {}", snippet),
                dev_insight: "insight".to_string(),
            }
        }
    }

    struct EchoCode;

    #[async_trait]
    impl CodeGenerator for EchoCode {
        async fn generate_code(&self, article_content: &str) -> Result<String> {
            Ok(format!("// code for: {}", article_content))
        }
    }

    /// Fails for one article, identified by its content.
    struct FailingCode {
        fail_on: String,
    }

    #[async_trait]
    impl CodeGenerator for FailingCode {
        async fn generate_code(&self, article_content: &str) -> Result<String> {
            if article_content == self.fail_on {
                return Err(Error::Pipeline("provider exploded".to_string()));
            }
            Ok(format!("// code for: {}", article_content))
        }
    }

    struct PanickingCode;

    #[async_trait]
    impl CodeGenerator for PanickingCode {
        async fn generate_code(&self, _article_content: &str) -> Result<String> {
            panic!("generator bug");
        }
    }

    struct PanickingContent;

    #[async_trait]
    impl ContentGenerator for PanickingContent {
        async fn generate(
            &self,
            title: &str,
            _snippet: &str,
            _category: Category,
        ) -> GeneratedContent {
            panic!("cannot write about {}", title);
        }
    }

    struct PanickingSearch;

    #[async_trait]
    impl SearchProvider for PanickingSearch {
        async fn search(&self, _query: &str, _count: usize) -> Vec<SearchResult> {
            panic!("search index unavailable");
        }
    }

    fn hits(n: usize) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult {
                title: format!("Title {}", i),
                link: format!("https://github.com/repo-{}", i),
                snippet: format!("Snippet {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_search_short_circuits() {
        let content = Arc::new(EchoContent::default());
        let pipeline =
            NewsPipeline::new(FixedSearch::new(vec![]), content.clone(), Arc::new(EchoCode));

        let result = pipeline.run("nothing").await;
        assert!(!result.success);
        assert_eq!(result.message, "No research results found");
        assert!(result.data.is_empty());
        assert_eq!(content.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requests_five_results() {
        let search = FixedSearch::new(hits(8));
        let pipeline = NewsPipeline::new(
            search.clone(),
            Arc::new(EchoContent::default()),
            Arc::new(EchoCode),
        );

        let result = pipeline.run("rust").await;
        assert_eq!(search.calls.lock().unwrap().as_slice(), &[("rust".to_string(), 5)]);
        assert_eq!(result.data.len(), 5);
    }

    #[tokio::test]
    async fn test_articles_follow_search_order_with_unique_ids() {
        let pipeline = NewsPipeline::new(
            FixedSearch::new(hits(4)),
            Arc::new(EchoContent::default()),
            Arc::new(EchoCode),
        );

        let result = pipeline.run("rust").await;
        assert!(result.success);
        assert_eq!(result.message, "Generated 4 news summaries");
        assert_eq!(result.data.len(), 4);

        let ids: HashSet<_> = result.data.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), 4);

        for (i, article) in result.data.iter().enumerate() {
            assert_eq!(article.title, format!("Title {}", i));
            assert_eq!(article.source_url, format!("https://github.com/repo-{}", i));
            assert_eq!(article.full_content, format!("content for Title {}", i));
            assert_eq!(article.summary, format!("summary of Snippet {}", i));
            assert_eq!(article.insight, "insight");
            assert_eq!(article.category, "Tools");
            assert_eq!(article.code, format!("// code for: content for Title {}", i));
        }
    }

    #[tokio::test]
    async fn test_categories_are_passed_to_content_generation() {
        let search = FixedSearch::new(vec![
            SearchResult {
                title: "GPT-5 released".to_string(),
                link: "https://techcrunch.com/a".to_string(),
                snippet: String::new(),
            },
            SearchResult {
                title: "New exploit".to_string(),
                link: "https://dev.to/b".to_string(),
                snippet: "a critical vulnerability".to_string(),
            },
        ]);
        let content = Arc::new(EchoContent::default());
        let pipeline = NewsPipeline::new(search, content.clone(), Arc::new(EchoCode));

        let result = pipeline.run("news").await;
        assert_eq!(
            content.categories.lock().unwrap().as_slice(),
            &[Category::AiModels, Category::Security]
        );
        assert_eq!(result.data[0].category, "AI Models");
        assert_eq!(result.data[1].category, "Security");
    }

    #[tokio::test]
    async fn test_partial_code_failure() {
        let pipeline = NewsPipeline::new(
            FixedSearch::new(hits(3)),
            Arc::new(EchoContent::default()),
            Arc::new(FailingCode {
                fail_on: "content for Title 1".to_string(),
            }),
        );

        let result = pipeline.run("rust").await;
        assert!(result.success);
        assert_eq!(result.data.len(), 3);
        assert_eq!(result.data[0].code, "// code for: content for Title 0");
        assert_eq!(
            result.data[1].code,
            "// Error generating code: Pipeline error: provider exploded"
        );
        assert_eq!(result.data[2].code, "// code for: content for Title 2");
    }

    #[tokio::test]
    async fn test_panicking_task_is_captured() {
        let pipeline = NewsPipeline::new(
            FixedSearch::new(hits(2)),
            Arc::new(EchoContent::default()),
            Arc::new(PanickingCode),
        );

        let result = pipeline.run("rust").await;
        assert!(result.success);
        for article in &result.data {
            assert!(
                article.code.starts_with("// Error generating code:"),
                "{}",
                article.code
            );
        }
    }

    #[tokio::test]
    async fn test_content_panic_becomes_failure_result() {
        let pipeline = NewsPipeline::new(
            FixedSearch::new(hits(1)),
            Arc::new(PanickingContent),
            Arc::new(EchoCode),
        );

        let result = pipeline.run("x").await;
        assert!(!result.success);
        assert!(result.data.is_empty());
        assert_eq!(result.message, "Error generating news: cannot write about Title 0");
    }

    #[tokio::test]
    async fn test_search_panic_becomes_failure_result() {
        let pipeline = NewsPipeline::new(
            Arc::new(PanickingSearch),
            Arc::new(EchoContent::default()),
            Arc::new(EchoCode),
        );

        let result = pipeline.run("x").await;
        assert_eq!(
            result,
            PipelineResult::failure("Error generating news: search index unavailable")
        );
    }

    #[test]
    fn test_batch_failure_applies_shared_message() {
        let mut articles: Vec<Article> = hits(2)
            .into_iter()
            .map(|hit| {
                Article::from(ArticleDraft::new(
                    hit,
                    Category::Tools,
                    GeneratedContent {
                        full_content: "c".to_string(),
                        summary: "s".to_string(),
                        dev_insight: "i".to_string(),
                    },
                ))
            })
            .collect();
        assert!(articles.iter().all(|a| a.code == CODE_PLACEHOLDER));

        apply_code_outcomes(&mut articles, Err(Error::Pipeline("join failed".to_string())));
        for article in &articles {
            assert_eq!(article.code, "// Code generation failed: Pipeline error: join failed");
        }
    }
}

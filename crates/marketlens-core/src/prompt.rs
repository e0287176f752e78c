//! Prompt templates per analysis mode.
//!
//! Each mode renders a fixed Jinja template with the subject(s) embedded
//! verbatim and the sub-aspects the answer should cover.

use minijinja::{Environment, context};
use strum::IntoEnumIterator;

use crate::analysis::{AnalysisMode, AnalysisRequest};
use crate::error::Result;

const OVERVIEW_TEMPLATE: &str = "{{ subject }}";

const SEARCH_PATTERNS_TEMPLATE: &str = "Analyze search patterns and trends for {{ subject }}. \
Focus on: 1. Most searched topics, 2. Common search queries, 3. Search trends, 4. Related searches";

const THEMES_TEMPLATE: &str = r#"Analyze key themes and topics for {{ subject }} focusing on:
1. Main discussion themes
2. Recurring topics
3. Customer interests
4. Product features
5. Brand perception

Please provide a structured analysis with clear categories and bullet points."#;

const PAIN_POINTS_TEMPLATE: &str = r#"Analyze customer pain points and issues for {{ subject }}.
Please provide analysis in the following categories:

1. Product Issues:
- Hardware problems
- Software bugs
- Design flaws
- Performance issues

2. Customer Service Issues:
- Support response time
- Resolution effectiveness
- Communication problems

3. User Experience Issues:
- Usability problems
- Interface complications
- Learning curve challenges

4. Value and Pricing Issues:
- Cost concerns
- Value for money
- Pricing structure

For each issue, indicate severity (High/Medium/Low) and frequency of occurrence."#;

const PLATFORMS_TEMPLATE: &str = r#"Analyze {{ subject }} across these platforms: {{ platforms | join(", ") }}

For each platform, provide:
1. Overall Performance Summary
2. Key Metrics and Statistics
3. Content Performance Analysis
4. User Engagement Patterns
5. Areas of Success
6. Areas for Improvement

Please structure the response with clear headers for each platform."#;

const COMPARISON_TEMPLATE: &str = r#"Compare {{ first }} and {{ second }} focusing on the following aspects:

1. Market Position:
- Market share and presence
- Target audience
- Brand positioning

2. Product Features:
- Key features comparison
- Unique selling points
- Technical specifications

3. Customer Perception:
- Brand sentiment
- Customer satisfaction
- User reviews

4. Performance Metrics:
- Sales performance
- Growth trends
- Market impact

5. Competitive Analysis:
- Strengths and weaknesses
- Competitive advantages
- Areas for improvement
{% if metrics %}

Metrics to score for each product:
{% for metric in metrics %}
- {{ metric }}
{% endfor %}
{% endif %}

Please provide a detailed comparison with clear sections and bullet points."#;

/// Renders the instruction string sent to the workflow endpoint.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    /// Compiles every mode template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for mode in AnalysisMode::iter() {
            env.add_template(template_name(mode), template_source(mode))?;
        }

        Ok(Self { env })
    }

    /// Builds the prompt for `request`.
    ///
    /// Returns an empty string when any subject is blank; callers are
    /// expected to reject such input before getting here.
    pub fn build(&self, request: &AnalysisRequest) -> Result<String> {
        if request.subjects().iter().any(|s| s.trim().is_empty()) {
            return Ok(String::new());
        }

        let subjects = request.subjects();
        let template = self.env.get_template(template_name(request.mode()))?;
        let prompt = template.render(context! {
            subject => subjects[0].as_str(),
            first => subjects[0].as_str(),
            second => subjects.get(1).map(String::as_str).unwrap_or_default(),
            platforms => request.extra_params(),
            metrics => request.extra_params(),
        })?;

        tracing::debug!(
            mode = %request.mode(),
            chars = prompt.len(),
            "Built analysis prompt"
        );
        Ok(prompt)
    }
}

fn template_name(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Overview => "overview",
        AnalysisMode::SearchPatterns => "search_patterns",
        AnalysisMode::Themes => "themes",
        AnalysisMode::PainPoints => "pain_points",
        AnalysisMode::Platforms => "platforms",
        AnalysisMode::Comparison => "comparison",
    }
}

fn template_source(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Overview => OVERVIEW_TEMPLATE,
        AnalysisMode::SearchPatterns => SEARCH_PATTERNS_TEMPLATE,
        AnalysisMode::Themes => THEMES_TEMPLATE,
        AnalysisMode::PainPoints => PAIN_POINTS_TEMPLATE,
        AnalysisMode::Platforms => PLATFORMS_TEMPLATE,
        AnalysisMode::Comparison => COMPARISON_TEMPLATE,
    }
}

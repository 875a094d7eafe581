//! Static table of competitor articles used as rewrite context.
//!
//! Keyed by topic bucket; lookup is a pure function over the article
//! title, so reference selection is deterministic and needs no network.

use ce_core::ReferenceArticle;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const CHATBOT: &str = "chatbot";
const CUSTOMER_ENGAGEMENT: &str = "customer-engagement";
const LEAD_GENERATION: &str = "lead-generation";
const VIRTUAL_ASSISTANT: &str = "virtual-assistant";
const SMALL_BUSINESS: &str = "small-business";

/// At most this many references go into a prompt.
pub const MAX_REFERENCES: usize = 2;

fn reference(title: &str, content: &str, url: &str) -> ReferenceArticle {
    ReferenceArticle {
        title: title.to_string(),
        content: content.to_string(),
        url: url.to_string(),
    }
}

static REFERENCE_TABLE: Lazy<HashMap<&'static str, Vec<ReferenceArticle>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        CHATBOT,
        vec![
            reference(
                "What is a Chatbot? Everything You Need to Know",
                "Chatbots are AI-powered software applications designed to simulate human \
                 conversation. They use natural language processing (NLP) and machine learning \
                 to understand user queries and provide relevant responses.\n\n\
                 Key Types of Chatbots:\n\
                 1. Rule-based chatbots - Follow predefined scripts and decision trees\n\
                 2. AI-powered chatbots - Use machine learning to understand context and intent\n\
                 3. Hybrid chatbots - Combine rule-based logic with AI capabilities\n\n\
                 Benefits for Businesses:\n\
                 - 24/7 customer support availability\n\
                 - Reduced operational costs\n\
                 - Faster response times\n\
                 - Scalable customer interactions\n\
                 - Data collection and insights\n\n\
                 Best practices for implementing chatbots include starting with specific use \
                 cases, training with real customer data, and continuously improving based on \
                 feedback.",
                "https://www.salesforce.com/blog/what-is-a-chatbot/",
            ),
            reference(
                "The Complete Guide to Building Effective Chatbots",
                "Building an effective chatbot requires careful planning and execution. This \
                 guide covers everything from design principles to deployment strategies.\n\n\
                 Chatbot Design Principles:\n\
                 1. Define clear objectives - Know what problems your chatbot should solve\n\
                 2. Map user journeys - Understand how users will interact with your bot\n\
                 3. Create conversational flows - Design natural dialogue paths\n\
                 4. Handle errors gracefully - Plan for misunderstandings\n\n\
                 Technical Considerations:\n\
                 - Choose the right platform (Dialogflow, Rasa, custom solutions)\n\
                 - Integrate with existing systems (CRM, support tickets)\n\
                 - Implement proper security measures\n\
                 - Plan for scalability\n\n\
                 Measuring Success:\n\
                 Track metrics like resolution rate, customer satisfaction, and cost per \
                 interaction to continuously improve your chatbot performance.",
                "https://www.hubspot.com/blog/chatbot-guide",
            ),
        ],
    );

    table.insert(
        CUSTOMER_ENGAGEMENT,
        vec![
            reference(
                "Customer Engagement Strategies That Work",
                "Customer engagement is the emotional connection between a customer and a \
                 brand. Strong engagement drives loyalty, advocacy, and revenue growth.\n\n\
                 Effective Engagement Strategies:\n\
                 1. Personalization - Tailor experiences based on customer data\n\
                 2. Omnichannel presence - Be where your customers are\n\
                 3. Proactive communication - Reach out before problems arise\n\
                 4. Community building - Create spaces for customers to connect\n\n\
                 AI and Automation:\n\
                 Modern customer engagement leverages AI for predictive analytics, personalized \
                 recommendations, and automated yet personalized interactions at scale.\n\n\
                 Metrics to Track:\n\
                 - Net Promoter Score (NPS)\n\
                 - Customer Satisfaction (CSAT)\n\
                 - Customer Effort Score (CES)\n\
                 - Engagement rates across channels",
                "https://www.zendesk.com/blog/customer-engagement/",
            ),
            reference(
                "How AI is Transforming Customer Engagement",
                "Artificial intelligence is revolutionizing how businesses engage with \
                 customers, creating more personalized and efficient experiences.\n\n\
                 AI-Powered Engagement Tools:\n\
                 1. Intelligent chatbots - Handle complex queries with natural language\n\
                 2. Predictive analytics - Anticipate customer needs\n\
                 3. Sentiment analysis - Understand customer emotions in real-time\n\
                 4. Recommendation engines - Suggest relevant products/content\n\n\
                 Implementation Best Practices:\n\
                 - Start with high-impact, low-complexity use cases\n\
                 - Maintain human oversight for complex situations\n\
                 - Continuously train AI models with new data\n\
                 - Balance automation with personal touch\n\n\
                 The future of customer engagement lies in seamlessly blending AI capabilities \
                 with human empathy to create exceptional experiences.",
                "https://www.mckinsey.com/ai-customer-engagement/",
            ),
        ],
    );

    table.insert(
        LEAD_GENERATION,
        vec![reference(
            "Lead Generation Strategies for Modern Businesses",
            "Lead generation is the process of attracting and converting prospects into \
             potential customers. Modern strategies combine digital marketing with \
             automation.\n\n\
             Effective Lead Generation Tactics:\n\
             1. Content marketing - Create valuable, targeted content\n\
             2. SEO optimization - Be found when prospects search\n\
             3. Social media marketing - Engage audiences on their platforms\n\
             4. Email marketing - Nurture leads with targeted campaigns\n\
             5. Chatbots - Qualify leads 24/7\n\n\
             Automation and AI:\n\
             Leverage marketing automation for lead scoring, nurturing sequences, and \
             personalized outreach at scale. AI helps identify high-intent prospects.\n\n\
             Conversion Optimization:\n\
             Focus on clear CTAs, landing page optimization, and reducing friction in the \
             lead capture process.",
            "https://www.marketo.com/lead-generation/",
        )],
    );

    table.insert(
        VIRTUAL_ASSISTANT,
        vec![reference(
            "Virtual Assistants: The Future of Business Productivity",
            "Virtual assistants are AI-powered tools that help businesses automate tasks \
             and improve productivity across operations.\n\n\
             Types of Virtual Assistants:\n\
             1. Personal productivity assistants (scheduling, reminders)\n\
             2. Customer service bots\n\
             3. IT help desk automation\n\
             4. HR and recruitment assistants\n\n\
             Key Capabilities:\n\
             - Natural language understanding\n\
             - Task automation and scheduling\n\
             - Integration with business systems\n\
             - Learning from interactions\n\n\
             Implementation Tips:\n\
             Start with specific use cases, train with domain-specific data, and ensure \
             proper security measures. Virtual assistants work best when they complement \
             human workers rather than replace them entirely.",
            "https://www.gartner.com/virtual-assistants-guide/",
        )],
    );

    table.insert(
        SMALL_BUSINESS,
        vec![reference(
            "How Small Businesses Can Leverage AI Chatbots",
            "Small businesses can now access the same AI-powered chatbot technology that \
             was once only available to enterprises, leveling the playing field.\n\n\
             Benefits for Small Businesses:\n\
             1. Cost-effective customer support - Handle inquiries without additional staff\n\
             2. Lead qualification - Capture and qualify leads automatically\n\
             3. Appointment scheduling - Reduce no-shows with automated reminders\n\
             4. FAQ automation - Answer common questions instantly\n\n\
             Getting Started:\n\
             Choose user-friendly platforms like Tidio, Intercom, or ManyChat. Start with \
             simple FAQ automation and gradually add complexity.\n\n\
             ROI Considerations:\n\
             Track time saved, leads generated, and customer satisfaction improvements. Most \
             small businesses see positive ROI within 3-6 months of implementation.",
            "https://www.smallbusiness.com/chatbot-guide/",
        )],
    );

    table
});

fn bucket(key: &str) -> Vec<ReferenceArticle> {
    REFERENCE_TABLE.get(key).cloned().unwrap_or_default()
}

fn combined(primary: &str, secondary: &str) -> Vec<ReferenceArticle> {
    let mut refs = bucket(primary);
    refs.extend(bucket(secondary));
    refs.truncate(MAX_REFERENCES);
    refs
}

/// Select 0-2 topically related competitor articles for a title.
/// First keyword group to match wins; the chatbot bucket is the
/// fallback.
pub fn match_references(title: &str) -> Vec<ReferenceArticle> {
    let title = title.to_lowercase();

    if title.contains("lead") || title.contains("generation") {
        return combined(LEAD_GENERATION, CHATBOT);
    }
    if title.contains("customer") || title.contains("engagement") || title.contains("interaction") {
        return bucket(CUSTOMER_ENGAGEMENT);
    }
    if title.contains("virtual") || title.contains("assistant") {
        return combined(VIRTUAL_ASSISTANT, CHATBOT);
    }
    if title.contains("small business") || title.contains("business growth") {
        return combined(SMALL_BUSINESS, CHATBOT);
    }

    bucket(CHATBOT)
}

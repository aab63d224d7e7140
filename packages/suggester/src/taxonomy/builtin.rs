//! Built-in keyword table.
//!
//! Keywords follow the published exam guide of the Google Professional Cloud
//! Developer certification, one block per guide section. High-weight
//! keywords are the guide's own topic phrases; medium and low weight cover
//! general vocabulary that leans towards a section.

use super::{DomainKeywords, ExamTaxonomy, WeightTier};

/// Exam identifier of the built-in table.
pub const GOOGLE_CLOUD_DEVELOPER: &str = "google_cloud_developer";

const GOOGLE_CLOUD_DEVELOPER_DISPLAY: &str = "Google Professional Cloud Developer";

const SECTION_1: &str =
    "Section 1: Designing highly scalable, available, and reliable cloud-native applications";
const SECTION_2: &str = "Section 2: Building and testing applications";
const SECTION_3: &str = "Section 3: Deploying applications";
const SECTION_4: &str = "Section 4: Integrating applications with Google Cloud services";

const SECTION_1_HIGH: &[&str] = &[
    "compute engine",
    "gke",
    "cloud run",
    "choosing platform",
    "use case",
    "requirements",
    "building",
    "refactoring",
    "deploying",
    "application containers",
    "google cloud services",
    "geographically distributed",
    "latency",
    "regional services",
    "zonal services",
    "load balancers",
    "load balancing",
    "session affinity",
    "performant content delivery",
    "memorystore",
    "caching solutions",
    "caching",
    "apis",
    "http rest",
    "grpc",
    "google remote procedure call",
    "application rate limiting",
    "authentication",
    "observability",
    "apigee",
    "cloud api gateway",
    "asynchronous",
    "event-driven approaches",
    "eventarc",
    "pub/sub",
    "pubsub",
    "cost optimization",
    "resource usage",
    "optimizing cost",
    "data replication",
    "zonal failover",
    "regional failover",
    "failover models",
    "traffic splitting",
    "gradual rollouts",
    "rollbacks",
    "a/b testing",
    "workflows",
    "cloud tasks",
    "cloud scheduler",
    "orchestrating application services",
    "data retention",
    "organization policies",
    "cloud storage object lifecycle management",
    "cloud storage retention policies",
    "lock retention policies",
    "security mechanisms",
    "vulnerabilities",
    "identity-aware proxy",
    "iap",
    "web security scanner",
    "artifact analysis",
    "security command center",
    "application secrets",
    "credentials",
    "encryption keys",
    "secret manager",
    "cloud key management service",
    "workload identity federation",
    "application default credentials",
    "json web token",
    "jwt",
    "oauth 2.0",
    "cloud sql auth proxy",
    "alloydb auth proxy",
    "identity platform",
    "end-user accounts",
    "identity and access management",
    "iam roles",
    "service accounts",
    "cloud service mesh",
    "kubernetes network policies",
    "service-to-service communications",
    "least privileged access",
    "principle of least privilege",
    "binary authorization",
    "application artifacts",
    "storage system",
    "volume of data",
    "performance requirements",
    "schemas",
    "structured databases",
    "alloydb",
    "spanner",
    "unstructured databases",
    "bigtable",
    "datastore",
    "eventual consistency",
    "strongly consistent replication",
    "cloud sql",
    "cloud storage",
    "signed urls",
    "cloud storage objects",
    "grant access",
    "bigquery",
    "analytics",
    "ai/ml workloads",
    "writing data",
];

const SECTION_1_MEDIUM: &[&str] = &[
    "microservices",
    "architecture",
    "design patterns",
    "scalable",
    "scalability",
    "availability",
    "reliable",
    "cloud-native",
    "designing",
    "application design",
    "system design",
    "distributed systems",
    "fault tolerance",
    "resilience",
    "auto scaling",
    "serverless architecture",
    "performance",
    "optimization",
    "best practices",
    "design principles",
    "cloud architecture",
    "solution design",
    "application structure",
    "service mesh",
    "event-driven",
    "asynchronous programming",
    "security",
    "compliance",
    "data protection",
    "encryption",
    "access control",
    "database design",
    "data modeling",
    "storage solutions",
    "data access patterns",
];

const SECTION_1_LOW: &[&str] = &[
    "application",
    "service",
    "system",
    "cloud",
    "google cloud",
    "efficiency",
    "maintainable",
    "extensible",
    "performance optimization",
    "cloud services",
    "managed services",
    "platform services",
];

const SECTION_2_HIGH: &[&str] = &[
    "google cloud cli",
    "local application development",
    "local unit testing",
    "emulating google cloud services",
    "google cloud console",
    "cloud sdk",
    "cloud code",
    "gemini cloud assist",
    "gemini code assist",
    "cloud shell",
    "cloud workstations",
    "cloud build",
    "artifact registry",
    "build and store containers",
    "source code",
    "provenance",
    "binary authorization",
    "unit tests",
    "writing unit tests",
    "automated integration tests",
    "executing integration tests",
];

const SECTION_2_MEDIUM: &[&str] = &[
    "testing",
    "unit test",
    "integration test",
    "debugging",
    "build process",
    "ci/cd",
    "continuous integration",
    "continuous deployment",
    "pipeline",
    "code quality",
    "test automation",
    "build tools",
    "compilation",
    "development environment",
    "local development",
    "development tools",
    "sdk",
    "api development",
    "version control",
    "code review",
    "static analysis",
    "linting",
    "development workflow",
    "containers",
    "docker",
    "container registry",
    "artifact management",
    "build automation",
];

const SECTION_2_LOW: &[&str] = &[
    "development",
    "coding",
    "programming",
    "software development",
    "testing framework",
    "development setup",
    "build configuration",
    "development best practices",
    "code organization",
];

const SECTION_3_HIGH: &[&str] = &[
    "cloud run",
    "deploying applications",
    "source code",
    "deploying from source",
    "cloud run services",
    "triggers",
    "eventarc",
    "pub/sub",
    "pubsub",
    "event receivers",
    "apis",
    "applications",
    "apigee",
    "exposing apis",
    "securing apis",
    "api version",
    "cloud endpoints",
    "backward compatibility",
    "deploying new api version",
    "gke",
    "google kubernetes engine",
    "deploying containerized applications",
    "resource requirements",
    "container workloads",
    "defining resource requirements",
    "kubernetes health checks",
    "application availability",
    "health checks",
    "horizontal pod autoscaler",
    "cost optimization",
    "hpa",
];

const SECTION_3_MEDIUM: &[&str] = &[
    "deployment",
    "deploy",
    "containers",
    "docker",
    "kubernetes",
    "container deployment",
    "rolling deployment",
    "blue-green deployment",
    "canary deployment",
    "production deployment",
    "staging",
    "environment management",
    "release management",
    "configuration management",
    "infrastructure",
    "compute engine",
    "managed services",
    "serverless deployment",
    "container orchestration",
    "application hosting",
    "runtime environment",
    "platform services",
];

const SECTION_3_LOW: &[&str] = &[
    "hosting",
    "runtime",
    "platform",
    "cloud platform",
    "deployment strategy",
    "release",
    "launch",
    "application deployment",
    "service deployment",
    "infrastructure deployment",
];

const SECTION_4_HIGH: &[&str] = &[
    "google cloud datastores",
    "cloud sql",
    "firestore",
    "cloud storage",
    "managing connections",
    "reading data",
    "writing data",
    "pub/sub",
    "pubsub",
    "publish data",
    "consume data",
    "publishing and consuming",
    "google cloud services",
    "enabling google cloud services",
    "api calls",
    "cloud client libraries",
    "rest api",
    "grpc",
    "api explorer",
    "batching requests",
    "restricting return data",
    "paginating results",
    "caching results",
    "handling errors",
    "exponential backoff",
    "error handling",
    "service accounts",
    "cloud api calls",
    "making api calls",
    "metrics",
    "logs",
    "traces",
    "google cloud observability",
    "instrumenting code",
    "troubleshooting",
    "identifying issues",
    "resolving issues",
    "error reporting",
    "managing application issues",
    "trace ids",
    "correlate trace spans",
    "tracing across services",
    "gemini cloud assist",
];

const SECTION_4_MEDIUM: &[&str] = &[
    "integration",
    "service integration",
    "data integration",
    "api integration",
    "database integration",
    "storage integration",
    "messaging",
    "message queues",
    "data processing",
    "etl",
    "data pipeline",
    "data flow",
    "authentication",
    "authorization",
    "iam",
    "security integration",
    "monitoring",
    "logging",
    "observability",
    "performance monitoring",
    "error tracking",
    "troubleshooting",
    "debugging",
    "application monitoring",
    "service communication",
    "inter-service communication",
];

const SECTION_4_LOW: &[&str] = &[
    "backend services",
    "third-party integration",
    "external services",
    "data access",
    "data storage",
    "cloud services",
    "managed services",
    "application integration",
    "system integration",
    "service connectivity",
];
fn section(name: &str, high: &[&str], medium: &[&str], low: &[&str]) -> DomainKeywords {
    DomainKeywords::new(name)
        .with_keywords(WeightTier::High, high.iter().copied())
        .with_keywords(WeightTier::Medium, medium.iter().copied())
        .with_keywords(WeightTier::Low, low.iter().copied())
}

/// Build the Google Professional Cloud Developer exam table.
pub(super) fn google_cloud_developer() -> ExamTaxonomy {
    ExamTaxonomy::new(GOOGLE_CLOUD_DEVELOPER)
        .with_display_name(GOOGLE_CLOUD_DEVELOPER_DISPLAY)
        .with_domain(section(SECTION_1, SECTION_1_HIGH, SECTION_1_MEDIUM, SECTION_1_LOW))
        .with_domain(section(SECTION_2, SECTION_2_HIGH, SECTION_2_MEDIUM, SECTION_2_LOW))
        .with_domain(section(SECTION_3, SECTION_3_HIGH, SECTION_3_MEDIUM, SECTION_3_LOW))
        .with_domain(section(SECTION_4, SECTION_4_HIGH, SECTION_4_MEDIUM, SECTION_4_LOW))
}

//! Vocabulary used by the translation layer

/// Repository namespace on the RDF side
pub const REPOSITORY_NAMESPACE: &str = "http://fedora.info/definitions/v4/repository#";

/// The store's own namespace, bridged to [`REPOSITORY_NAMESPACE`]
pub const JCR_NAMESPACE: &str = "http://www.jcp.org/jcr/1.0";

pub const PREMIS_NAMESPACE: &str = "http://www.loc.gov/premis/rdf/v1#";
pub const LDP_NAMESPACE: &str = "http://www.w3.org/ns/ldp#";
pub const SEARCH_NAMESPACE: &str = "http://sindice.com/vocab/search#";
pub const VANN_NAMESPACE: &str = "http://purl.org/vocab/vann/";
pub const VOAF_NAMESPACE: &str = "http://purl.org/vocommons/voaf#";
pub const DCTERMS_NAMESPACE: &str = "http://purl.org/dc/terms/";

// Search results
pub const HAS_MEMBER_OF_RESULT: &str = "http://sindice.com/vocab/search#hasMemberOfResult";

// Fixity
pub const HAS_FIXITY: &str = "http://www.loc.gov/premis/rdf/v1#hasFixity";
pub const FIXITY_TYPE: &str = "http://www.loc.gov/premis/rdf/v1#Fixity";
pub const HAS_MESSAGE_DIGEST: &str = "http://www.loc.gov/premis/rdf/v1#hasMessageDigest";
pub const HAS_SIZE: &str = "http://www.loc.gov/premis/rdf/v1#hasSize";
pub const HAS_FIXITY_STATE: &str = "http://fedora.info/definitions/v4/repository#status";
pub const HAS_LOCATION: &str = "http://fedora.info/definitions/v4/repository#hasLocation";

// Containment
pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

// Namespaces
pub const VOCABULARY_TYPE: &str = "http://purl.org/vocommons/voaf#Vocabulary";
pub const PREFERRED_NAMESPACE_PREFIX: &str = "http://purl.org/vocab/vann/preferredNamespacePrefix";
pub const PREFERRED_NAMESPACE_URI: &str = "http://purl.org/vocab/vann/preferredNamespaceUri";

// Workspaces
pub const HAS_WORKSPACE: &str = "http://fedora.info/definitions/v4/repository#hasWorkspace";
pub const WORKSPACE_TYPE: &str = "http://fedora.info/definitions/v4/repository#Workspace";
pub const TITLE: &str = "http://purl.org/dc/terms/title";

/// Every predicate in these namespaces is maintained by the repository
pub const MANAGED_NAMESPACES: [&str; 2] = [REPOSITORY_NAMESPACE, JCR_NAMESPACE];

/// Individually managed predicates outside [`MANAGED_NAMESPACES`]
pub const MANAGED_PREDICATES: [&str; 4] = [HAS_SIZE, HAS_MESSAGE_DIGEST, HAS_FIXITY, CONTAINS];

//! Built-in "system model" hierarchy.

use super::TreeNode;

fn leaf(name: &str, description: &str) -> TreeNode {
    TreeNode::new(name, description)
}

/// The Black Box: four ring categories plus the "Outermost" practices group.
pub fn system_model_tree() -> TreeNode {
    TreeNode::new(
        "The Black Box",
        "Hidden operations that make the world programmable. These internal logics turn physical, \
         social and sensory experience into data that systems record, encode, route and compute. \
         They shape how inequality is generated, reinforced or obscured across technical, \
         institutional and infrastructural environments.",
    )
    .with_children(vec![
        digital_mediation(),
        conditions_of_mediation(),
        lived_experience(),
        positionalities(),
        outermost(),
    ])
}

fn digital_mediation() -> TreeNode {
    TreeNode::new("Digital mediation", "Ways information moves through a system.").with_children(vec![
        leaf(
            "In data",
            "How information is captured, collected or recorded. Includes documentation, \
             measurement, sensing, metadata and categorisation.",
        ),
        leaf(
            "Via data",
            "How information is routed, processed or transformed within a system. Includes \
             infrastructural flows, computation, organisation, sorting and transmission.",
        ),
        leaf(
            "By data",
            "How information is circulated, reused or reinterpreted by communities and publics. \
             Includes communal meaning-making, recontextualisation, creative reuse and \
             reinterpretation of outputs.",
        ),
    ])
}

fn conditions_of_mediation() -> TreeNode {
    TreeNode::new(
        "Conditions of mediation",
        "Technical, institutional and procedural elements that shape how mediation happens.",
    )
    .with_children(vec![
        leaf(
            "Systems",
            "Platforms, networks, databases, hardware and organisational structures.",
        ),
        leaf(
            "People",
            "Individuals who design, maintain, operate or experience systems.",
        ),
        leaf(
            "Processes",
            "Procedures for handling information: documentation, classification, verification, \
             moderation, sorting and routing.",
        ),
    ])
}

fn lived_experience() -> TreeNode {
    TreeNode::new(
        "Lived experience",
        "Domains where mediation meets everyday life: sensory, emotional, relational and material.",
    )
    .with_children(vec![
        leaf(
            "Narrative",
            "Forms of story, memory, history and personal or collective documentation.",
        ),
        leaf(
            "Embodiment",
            "Physical, sensory and perceptual aspects of life including movement, sensation and \
             interaction.",
        ),
        leaf(
            "Materiality",
            "Devices, infrastructures and environments that shape everyday life. Includes objects, \
             technologies, built forms and spatial conditions.",
        ),
        leaf(
            "Labour",
            "Activities through which effort, production or contribution occur. Includes paid, \
             unpaid, formal and informal work.",
        ),
        leaf(
            "Care",
            "Practices of support and relational maintenance including caregiving, assistance and \
             interdependence.",
        ),
        leaf(
            "Authorship",
            "Creation and expression of meaning or representation. Includes writing, documenting, \
             designing and producing.",
        ),
        leaf(
            "Affect",
            "Emotional, atmospheric and felt dimensions of experience.",
        ),
        leaf(
            "Relationality",
            "Social connections, belonging and interpersonal ties.",
        ),
    ])
}

fn positionalities() -> TreeNode {
    TreeNode::new(
        "Positionalities",
        "Structural locations that shape how people encounter systems and inequalities.",
    )
    .with_children(vec![
        leaf("Race", "Patterns related to racial identity and racialisation."),
        leaf("Ethnicity", "Shared cultural heritage, linguistic background and belonging."),
        leaf(
            "Class",
            "Socioeconomic position shaped by income, resources, employment and conditions.",
        ),
        leaf("Gender", "Identity, expression and social organisation related to gender."),
        leaf(
            "Sexuality and LGBTQI+",
            "Sexual orientation, gender diversity and related forms of social positioning.",
        ),
        leaf(
            "Disability",
            "Physical, sensory, cognitive or mental characteristics shaping interaction with \
             environments and systems.",
        ),
        leaf("Age", "Life stage or generational position."),
        leaf(
            "Migration and Legal Status",
            "Citizenship, residency, documentation, mobility and cross-border conditions.",
        ),
        leaf("Religion", "Belief systems, cultural affiliation and social belonging."),
        leaf(
            "Urban and Rural",
            "Spatial environments shaped by infrastructural density or remoteness.",
        ),
        leaf(
            "Nation and Region",
            "Geopolitical and geographical location within national and global structures.",
        ),
        leaf(
            "Language",
            "Linguistic identity, communication patterns and access to resources.",
        ),
        leaf("Caste", "Inherited stratification shaped by culture and history."),
        leaf(
            "Indigeneity",
            "Indigenous belonging, land relations, cultural continuity and collective identity.",
        ),
        leaf(
            "Carceral Status",
            "Position in relation to policing, surveillance, detention or incarceration.",
        ),
        leaf(
            "Family and Kinship Structure",
            "Household configurations, relational roles and responsibilities.",
        ),
    ])
}

fn outermost() -> TreeNode {
    TreeNode::new(
        "Outermost",
        "Practices that follow from making mediation visible.",
    )
    .with_children(vec![
        leaf(
            "Literacy",
            "Understanding how mediation works across all layers of the system.",
        ),
        leaf(
            "Visibility",
            "Seeing what becomes perceptible once mediation is understood.",
        ),
        leaf(
            "Accountability",
            "Acting on what becomes visible in design decisions, research, and professional \
             practice.",
        ),
    ])
}

use crate::ensemble::Mutation;
use crate::utils::Allele;

/// APOBEC3 editing signature: C>T preceded by T (TC context), or its reverse
/// complement G>A followed by A, judged against the root sequence.
pub fn is_apobec_context(mutation: &Mutation, root_sequence: &[Allele]) -> bool {
    let site = mutation.site as usize;
    match (mutation.from, mutation.to) {
        (Allele::C, Allele::T) => site
            .checked_sub(1)
            .and_then(|prev| root_sequence.get(prev))
            .is_some_and(|&allele| allele == Allele::T),
        (Allele::G, Allele::A) => site
            .checked_add(1)
            .and_then(|next| root_sequence.get(next))
            .is_some_and(|&allele| allele == Allele::A),
        _ => false,
    }
}

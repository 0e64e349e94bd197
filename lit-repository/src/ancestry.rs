use lit_branch::Branch;
use lit_hash::Sha1;

/// Latest commit (by hash identity) present in both branches' histories.
/// Two descending pointers, each starting at its branch's last index; the
/// pointer on the more-recently-timestamped side steps back first. On a
/// timestamp tie both sides step back together, which keeps the search
/// symmetric under argument order.
pub fn common_ancestor(b1: &Branch, b2: &Branch) -> Option<Sha1> {
    if b1.commits.is_empty() || b2.commits.is_empty() {
        return None;
    }
    let mut i = b1.commits.len() as isize - 1;
    let mut j = b2.commits.len() as isize - 1;
    while i >= 0 && j >= 0 {
        let ci = &b1.commits[i as usize];
        let cj = &b2.commits[j as usize];
        if ci.hash == cj.hash {
            return Some(ci.hash);
        }
        if ci.raw_time > cj.raw_time {
            i -= 1;
        } else if cj.raw_time > ci.raw_time {
            j -= 1;
        } else {
            i -= 1;
            j -= 1;
        }
    }
    None
}

/// Linear scan by hash equality.
pub fn index_of(branch: &Branch, hash: &Sha1) -> Option<usize> {
    branch.commits.iter().position(|c| &c.hash == hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_object::Commit;

    fn branch_with(commits: &[(&str, u64)]) -> Branch {
        let mut b = Branch::create("b", 1);
        for (msg, t) in commits {
            b.append_commit(Commit::create(*msg, *t));
        }
        b
    }

    #[test]
    fn finds_shared_prefix() {
        let b1 = branch_with(&[("c0", 1000), ("c1", 2000), ("c2", 3000)]);
        let mut b2 = Branch::create("dev", 2);
        b2.commits = b1.commits[..2].to_vec();
        b2.head = 1;
        b2.append_commit(Commit::create("d1", 2500));

        let ancestor = common_ancestor(&b1, &b2).unwrap();
        assert_eq!(ancestor, b1.commits[1].hash);
    }

    #[test]
    fn symmetric_under_argument_order() {
        let b1 = branch_with(&[("c0", 1000), ("c1", 2000)]);
        let mut b2 = Branch::create("dev", 2);
        b2.commits = b1.commits[..1].to_vec();
        b2.head = 0;
        b2.append_commit(Commit::create("d1", 1500));

        assert_eq!(common_ancestor(&b1, &b2), common_ancestor(&b2, &b1));
    }

    #[test]
    fn unrelated_branches_have_no_ancestor() {
        let b1 = branch_with(&[("c0", 1000)]);
        let b2 = branch_with(&[("d0", 1000)]);
        assert_eq!(common_ancestor(&b1, &b2), None);
    }

    #[test]
    fn empty_branch_has_no_ancestor() {
        let b1 = branch_with(&[("c0", 1000)]);
        let b2 = Branch::create("empty", 2);
        assert_eq!(common_ancestor(&b1, &b2), None);
    }

    #[test]
    fn index_of_finds_and_misses() {
        let b = branch_with(&[("c0", 1000), ("c1", 2000)]);
        assert_eq!(index_of(&b, &b.commits[1].hash), Some(1));
        assert_eq!(index_of(&b, &Sha1::digest(b"nope")), None);
    }
}
